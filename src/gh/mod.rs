// === Module Header (agents-tooling) START ===
// purpose: Command seam for the GitHub CLI: trait, subprocess backend, dry-run wrapper, recording double
// role: integration/gh
// inputs: Repo references, search queries, label definitions
// outputs: Parsed PR records; side-effecting close/label calls
// side_effects: GhCli spawns `gh` and echoes each command line to stdout
// invariants:
// - Every call is synchronous; nothing is retried
// - DryRunGh forwards reads and never forwards mutations
// errors: GhError (not found, spawn, non-zero exit, malformed JSON)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod error;
pub mod executor;

use crate::model::{LabelSpec, PullRequest, Repo};

pub use error::{GhError, GhResult};
pub use executor::GhCli;

// --- Trait seam for the GitHub CLI ---
pub trait GhApi {
  fn list_pull_requests(&self, repo: &Repo, search: &str, limit: Option<u32>) -> GhResult<Vec<PullRequest>>;
  fn close_pull_request(&self, repo: &Repo, pr: &PullRequest) -> GhResult<()>;
  fn upsert_label(&self, repo: &Repo, label: &LabelSpec) -> GhResult<()>;
}

/// Reads go to `inner`; mutations are only announced on stdout, echoed with `bin` like [`GhCli`] does.
pub struct DryRunGh<'a> {
  inner: &'a dyn GhApi,
  bin: String,
}

impl<'a> DryRunGh<'a> {
  pub fn new(inner: &'a dyn GhApi, bin: impl Into<String>) -> Self {
    Self { inner, bin: bin.into() }
  }
}

impl GhApi for DryRunGh<'_> {
  fn list_pull_requests(&self, repo: &Repo, search: &str, limit: Option<u32>) -> GhResult<Vec<PullRequest>> {
    self.inner.list_pull_requests(repo, search, limit)
  }

  fn close_pull_request(&self, repo: &Repo, pr: &PullRequest) -> GhResult<()> {
    let args = executor::pr_close_args(repo, pr.number);
    println!("Would close \"{}\":\n\t{}", pr.title, executor::display_command(&self.bin, &args));
    Ok(())
  }

  fn upsert_label(&self, repo: &Repo, label: &LabelSpec) -> GhResult<()> {
    let args = executor::label_create_args(repo, label);
    println!("Would run: {}", executor::display_command(&self.bin, &args));
    Ok(())
  }
}

/// In-memory double: canned PR lists per repo, every call recorded as its `gh` argv.
#[cfg(any(test, feature = "testutil"))]
pub struct RecordingGh {
  prs: std::collections::HashMap<String, Vec<PullRequest>>,
  failing_repo: Option<String>,
  calls: std::cell::RefCell<Vec<Vec<String>>>,
}

#[cfg(any(test, feature = "testutil"))]
impl RecordingGh {
  pub fn new() -> Self {
    Self { prs: std::collections::HashMap::new(), failing_repo: None, calls: std::cell::RefCell::new(Vec::new()) }
  }

  pub fn with_prs(mut self, repo: &Repo, prs: Vec<PullRequest>) -> Self {
    self.prs.insert(repo.to_string(), prs);
    self
  }

  /// Every call against `repo` fails as if `gh` exited with status 1.
  pub fn failing_for(mut self, repo: &Repo) -> Self {
    self.failing_repo = Some(repo.to_string());
    self
  }

  pub fn calls(&self) -> Vec<Vec<String>> {
    self.calls.borrow().clone()
  }

  /// Recorded calls whose argv starts with `prefix`, e.g. `["pr", "close"]`.
  pub fn calls_starting_with(&self, prefix: &[&str]) -> Vec<Vec<String>> {
    self
      .calls
      .borrow()
      .iter()
      .filter(|c| c.len() >= prefix.len() && c.iter().zip(prefix).all(|(a, b)| a == b))
      .cloned()
      .collect()
  }

  fn record(&self, repo: &Repo, args: Vec<String>) -> GhResult<()> {
    let command = executor::display_command("gh", &args);
    self.calls.borrow_mut().push(args);
    if self.failing_repo.as_deref() == Some(repo.to_string().as_str()) {
      return Err(GhError::CommandFailed { command, code: 1, stderr: "simulated failure".into() });
    }
    Ok(())
  }
}

#[cfg(any(test, feature = "testutil"))]
impl Default for RecordingGh {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(any(test, feature = "testutil"))]
impl GhApi for RecordingGh {
  fn list_pull_requests(&self, repo: &Repo, search: &str, limit: Option<u32>) -> GhResult<Vec<PullRequest>> {
    self.record(repo, executor::pr_list_args(repo, search, limit))?;
    Ok(self.prs.get(&repo.to_string()).cloned().unwrap_or_default())
  }

  fn close_pull_request(&self, repo: &Repo, pr: &PullRequest) -> GhResult<()> {
    self.record(repo, executor::pr_close_args(repo, pr.number))
  }

  fn upsert_label(&self, repo: &Repo, label: &LabelSpec) -> GhResult<()> {
    self.record(repo, executor::label_create_args(repo, label))
  }
}
