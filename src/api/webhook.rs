//! Push notification handler

use axum::{body::Bytes, extract::State as AxumState};
use tracing::{debug, info};

use super::HookResponse;
use crate::SharedState;
use crate::dispatch::dispatch;
use crate::error::HookError;
use crate::webhook::Payload;

/// Decode the body, run the matching script and report its output.
///
/// The body is decoded as JSON whatever the content type says. A decode
/// failure is answered right away and nothing is executed.
pub async fn handle_push(AxumState(state): AxumState<SharedState>, body: Bytes) -> HookResponse {
    let payload = match Payload::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            let err = HookError::from(e);
            info!("Could not parse JSON body: {}", err);
            return HookResponse::bad_request(err.to_string());
        }
    };
    debug!("Payload decoded: {:?}", payload);

    let outcome = dispatch(&state.config, &state.runner, &payload).await;
    if outcome.is_failure() {
        HookResponse::bad_gateway(outcome.message())
    } else {
        HookResponse::ok(outcome.message())
    }
}
