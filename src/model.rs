// === Module Header (agents-tooling) START ===
// purpose: Define the records exchanged with `gh` (pull requests, labels) and the repository reference
// role: model/types
// outputs: Deserializable PR records as emitted by `gh pr list --json`; label definitions passed to `gh label create`
// invariants: Unknown JSON fields are ignored; null auto-merge requests and null label lists deserialize to None
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `owner/name` of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
  pub owner: String,
  pub name: String,
}

impl Repo {
  pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
    Self { owner: owner.into(), name: name.into() }
  }
}

impl fmt::Display for Repo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
  #[serde(default)]
  pub login: String,
  #[serde(default)]
  pub is_bot: bool,
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoMergeRequest {
  #[serde(default)]
  pub merge_method: Option<String>,
  #[serde(default)]
  pub enabled_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
  pub name: String,
  #[serde(default)]
  pub color: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
}

/// One entry of `gh pr list --json author,autoMergeRequest,createdAt,labels,number,title`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
  pub number: u64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub author: Option<Author>,
  #[serde(default)]
  pub auto_merge_request: Option<AutoMergeRequest>,
  #[serde(default)]
  pub labels: Option<Vec<Label>>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl PullRequest {
  pub fn author_login(&self) -> Option<&str> {
    self.author.as_ref().map(|a| a.login.as_str())
  }

  pub fn has_auto_merge(&self) -> bool {
    self.auto_merge_request.is_some()
  }

  pub fn is_labeled(&self) -> bool {
    self.labels.as_ref().is_some_and(|l| !l.is_empty())
  }
}

/// Fields requested from `gh pr list`; must cover every field of [`PullRequest`].
pub const PULL_REQUEST_FIELDS: &[&str] = &["author", "autoMergeRequest", "createdAt", "labels", "number", "title"];

/// Arguments for `gh label create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
  pub name: String,
  pub color: String,
  pub description: String,
}
