//! Matches a push payload against the watch list and runs the selected script

use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::{Config, WatchItem};
use crate::runner::ScriptRunner;
use crate::webhook::Payload;

/// Message returned when no watch item matches a payload.
pub const MISS: &str = "miss";

/// Result of dispatching one payload.
#[derive(Debug)]
pub enum DispatchOutcome<'a> {
    /// No watch item matched; nothing ran.
    Miss,
    /// The matched script exited successfully with this stdout.
    Ran { item: &'a WatchItem, output: String },
    /// The matched script could not be started or exited nonzero.
    Failed { item: &'a WatchItem, error: String },
}

impl DispatchOutcome<'_> {
    pub fn is_failure(&self) -> bool {
        matches!(self, DispatchOutcome::Failed { .. })
    }

    /// Text reported back to the caller.
    pub fn message(&self) -> &str {
        match self {
            DispatchOutcome::Miss => MISS,
            DispatchOutcome::Ran { output, .. } => output,
            DispatchOutcome::Failed { error, .. } => error,
        }
    }
}

impl WatchItem {
    /// Repository URL must be equal byte for byte; the branch only has to
    /// appear somewhere in the ref, so "main" also matches "refs/heads/release-main".
    pub fn matches(&self, payload: &Payload) -> bool {
        payload.repository.url == self.repo && payload.git_ref.contains(&self.branch)
    }
}

/// Finds the first watch item matching the payload. Returns None if there's no match.
pub fn find_item<'a>(config: &'a Config, payload: &Payload) -> Option<&'a WatchItem> {
    config.items.iter().find(|item| item.matches(payload))
}

/// Run the script of the first matching item, at most once.
pub async fn dispatch<'a>(
    config: &'a Config,
    runner: &ScriptRunner,
    payload: &Payload,
) -> DispatchOutcome<'a> {
    debug!(
        "Payload canonical repo '{}', commit branches {:?}",
        payload.canonical_repo_url(),
        payload.changed_branches()
    );

    let Some(item) = find_item(config, payload) else {
        warn!(
            "No matching item for repo '{}' and ref '{}', skipping.",
            payload.repository.url, payload.git_ref
        );
        return DispatchOutcome::Miss;
    };

    let run_id = Uuid::now_v7();
    let span = info_span!("run", %run_id, repo = %item.repo, branch = %item.branch);

    async move {
        info!("Push on '{}' matched script '{}'", payload.git_ref, item.script);
        match runner.run(item).await {
            Ok(output) => {
                info!("Run {} completed successfully.", run_id);
                DispatchOutcome::Ran { item, output }
            }
            Err(e) => {
                warn!("Run {} failed: {}", run_id, e);
                DispatchOutcome::Failed {
                    item,
                    error: e.to_string(),
                }
            }
        }
    }
    .instrument(span)
    .await
}
