//! Runs the script attached to a watch item

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{error, info};

use crate::config::WatchItem;
use crate::error::{HookError, Result};

/// Executes watch item scripts relative to a base directory.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    base_dir: PathBuf,
}

impl Default for ScriptRunner {
    /// Scripts resolve against the process working directory (`./<script>`).
    fn default() -> Self {
        Self::new(".")
    }
}

impl ScriptRunner {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Path the item's script is launched from.
    pub fn script_path(&self, item: &WatchItem) -> PathBuf {
        self.base_dir.join(&item.script)
    }

    /// Run the item's script to completion and return its stdout.
    ///
    /// The script is executed directly, without arguments and without a shell
    /// in between: its shebang picks the interpreter and it must be executable.
    /// Only stdout is captured; stderr goes to the parent's stderr and stdin is
    /// null. There is no timeout: the future resolves only once the child
    /// exits. On a nonzero exit the partial stdout is discarded.
    pub async fn run(&self, item: &WatchItem) -> Result<String> {
        let script = self.script_path(item);
        let script_display = script.display().to_string();

        info!("Running: {}", script_display);
        let output = Command::new(&script)
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| {
                error!("{} failed to start: {}", script_display, e);
                HookError::ScriptLaunch {
                    script: script_display.clone(),
                    source: e,
                }
            })?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            info!("Run {} output:\n{}", script_display, stdout);
            Ok(stdout)
        } else {
            let err = HookError::ScriptFailed {
                script: script_display,
                status: output.status,
            };
            error!("{}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// Write an executable script into `dir`.
    pub(crate) fn write_script(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn item(script: &str) -> WatchItem {
        WatchItem {
            repo: "https://github.com/acme/api".to_string(),
            branch: "main".to_string(),
            script: script.to_string(),
        }
    }

    #[test]
    fn test_default_runner_uses_working_directory() {
        let runner = ScriptRunner::default();
        assert_eq!(
            runner.script_path(&item("deploy.sh")),
            Path::new("./deploy.sh")
        );
    }

    #[tokio::test]
    async fn test_run_returns_stdout() {
        let dir = TempDir::new().unwrap();
        write_script(dir.path(), "ok.sh", "#!/bin/sh\necho deployed\n");

        let output = ScriptRunner::new(dir.path())
            .run(&item("ok.sh"))
            .await
            .unwrap();
        assert_eq!(output, "deployed\n");
    }

    #[tokio::test]
    async fn test_shebang_selects_interpreter() {
        let dir = TempDir::new().unwrap();
        write_script(
            dir.path(),
            "deploy.py",
            "#!/usr/bin/env python3\nprint('deployed')\n",
        );

        let output = ScriptRunner::new(dir.path())
            .run(&item("deploy.py"))
            .await
            .unwrap();
        assert_eq!(output, "deployed\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_status_only() {
        let dir = TempDir::new().unwrap();
        write_script(
            dir.path(),
            "fail.sh",
            "#!/bin/sh\necho partial\necho secret-token >&2\nexit 3\n",
        );

        let err = ScriptRunner::new(dir.path())
            .run(&item("fail.sh"))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, HookError::ScriptFailed { .. }));
        assert!(msg.ends_with("fail.sh exited with exit status: 3"), "{msg}");
        assert!(!msg.contains("secret-token"));
        assert!(!msg.contains("partial"));
    }

    #[tokio::test]
    async fn test_missing_script_is_launch_error() {
        let dir = TempDir::new().unwrap();
        let err = ScriptRunner::new(dir.path())
            .run(&item("absent.sh"))
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::ScriptLaunch { .. }));
    }

    #[tokio::test]
    async fn test_non_executable_script_is_launch_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plain.sh"), "#!/bin/sh\necho hi\n").unwrap();

        let err = ScriptRunner::new(dir.path())
            .run(&item("plain.sh"))
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::ScriptLaunch { .. }));
    }

    #[tokio::test]
    async fn test_script_path_is_not_shell_interpreted() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("injected");
        let sneaky = format!("x.sh; touch {}", marker.display());

        let result = ScriptRunner::new(dir.path()).run(&item(&sneaky)).await;
        assert!(result.is_err());
        assert!(!marker.exists());
    }
}
