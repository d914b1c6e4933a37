// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the pull request shape consumed from GitHub and the commit status payload sent back
// role: model/types
// outputs: Deserializable PullRequest (GitHub REST shape, identifying fields only) and serializable StatusPayload
// invariants: PullRequest is read-only input; StatusPayload serializes to the GitHub commit-status body
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Repo {
  pub full_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HeadRef {
  pub sha: String,
  /// `None` when the fork backing the pull request has been deleted.
  #[serde(default)]
  pub repo: Option<Repo>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BaseRef {
  pub r#ref: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
  pub login: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PullRequest {
  pub number: u64,
  pub head: HeadRef,
  pub base: BaseRef,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user: Option<User>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub html_url: Option<String>,
}

impl PullRequest {
  /// Full name of the repository the head commit lives in; empty when the fork is gone.
  pub fn head_repo_full_name(&self) -> &str {
    self.head.repo.as_ref().map(|r| r.full_name.as_str()).unwrap_or("")
  }
}

/// Accepts either a single pull request object or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PullRequestInput {
  One(Box<PullRequest>),
  Many(Vec<PullRequest>),
}

impl PullRequestInput {
  pub fn into_vec(self) -> Vec<PullRequest> {
    match self {
      PullRequestInput::One(p) => vec![*p],
      PullRequestInput::Many(v) => v,
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
  Error,
  Failure,
  Pending,
  Success,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatusPayload {
  pub state: StatusState,
  #[serde(rename = "description")]
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_url: Option<String>,
  pub context: String,
}
