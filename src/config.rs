//! Watch list configuration, loaded once at startup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{HookError, Result};

/// Overrides `Config::bind` when set to a non-empty value.
pub const BIND_ADDRESS_ENV: &str = "BIND_ADDRESS";

/// One watched repository/branch pair and the script it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchItem {
    pub repo: String,
    pub branch: String,
    pub script: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub bind: String,
    /// Match priority follows this order: first match wins.
    pub items: Vec<WatchItem>,
}

impl Config {
    /// Apply `BIND_ADDRESS` from the environment, if present.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind) = std::env::var(BIND_ADDRESS_ENV) {
            if !bind.is_empty() {
                self.bind = bind;
            }
        }
        self
    }
}

/// Load and parse the configuration file.
///
/// Files ending in `.toml` are read as TOML, everything else as JSON. Both
/// formats share the same schema and no field has a default.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| HookError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let parsed: std::result::Result<Config, String> = if is_toml {
        toml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| HookError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}
