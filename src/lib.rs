pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod runner;
pub mod webhook;

use std::sync::Arc;

use config::Config;
use runner::ScriptRunner;

/// Built once at startup and never mutated, so handlers share it without locking.
pub struct AppState {
    pub config: Config,
    pub runner: ScriptRunner,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            runner: ScriptRunner::default(),
        }
    }
}

pub type SharedState = Arc<AppState>;
