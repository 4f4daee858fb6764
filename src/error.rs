use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Custom error type for push_hook operations
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{}': {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Payload decode failed: {0}")]
    PayloadDecode(#[from] serde_json::Error),

    #[error("Failed to start script '{script}': {source}")]
    ScriptLaunch {
        script: String,
        #[source]
        source: io::Error,
    },

    #[error("{script} exited with {status}")]
    ScriptFailed { script: String, status: ExitStatus },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Helper type for Results that use HookError
pub type Result<T> = std::result::Result<T, HookError>;
