//! Push notification payload

use serde::{Deserialize, Serialize};

/// Inbound push notification. Absent fields decode as empty values so a
/// sparse payload simply fails to match instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    /// e.g. "refs/heads/develop"
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub repository: Repository,
    pub canon_url: String,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// e.g. "https://github.com/acme/api"
    pub url: String,
    pub absolute_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub branch: String,
}

impl Payload {
    /// Decode the first JSON value of a raw request body. Whatever follows
    /// that value is ignored.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        match serde_json::Deserializer::from_slice(body).into_iter::<Self>().next() {
            Some(payload) => payload,
            // Empty or whitespace-only body: surface the EOF error.
            None => serde_json::from_slice(body),
        }
    }

    /// Bitbucket style repository address: `canon_url` joined with
    /// `repository.absolute_url`, trailing slashes trimmed.
    pub fn canonical_repo_url(&self) -> String {
        format!("{}{}", self.canon_url, self.repository.absolute_url)
            .trim_end_matches('/')
            .to_string()
    }

    /// Branch names reported by the commits list, deduplicated, in first-seen order.
    pub fn changed_branches(&self) -> Vec<&str> {
        let mut branches: Vec<&str> = Vec::new();
        for commit in &self.commits {
            let branch = commit.branch.as_str();
            if !branch.is_empty() && !branches.contains(&branch) {
                branches.push(branch);
            }
        }
        branches
    }
}
