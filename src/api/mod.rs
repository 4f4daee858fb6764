//! HTTP surface: a single push endpoint

pub mod response;
pub mod webhook;

use axum::{Router, routing};

use crate::SharedState;

pub use response::HookResponse;
pub use webhook::handle_push;

/// Every method and every path reaches the push handler.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", routing::any(handle_push))
        .fallback(handle_push)
        .with_state(state)
}
