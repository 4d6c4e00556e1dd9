//! Blocking subprocess wrapper around the `gh` executable.

use std::process::Command;

use tracing::{debug, error};

use super::error::{GhError, GhResult};
use super::GhApi;
use crate::model::{LabelSpec, PullRequest, Repo, PULL_REQUEST_FIELDS};

/// Arguments for `gh pr list` restricted to open PRs matching `search`.
pub fn pr_list_args(repo: &Repo, search: &str, limit: Option<u32>) -> Vec<String> {
  let mut args: Vec<String> = vec![
    "pr".into(),
    "list".into(),
    "--repo".into(),
    repo.to_string(),
    "--json".into(),
    PULL_REQUEST_FIELDS.join(","),
    "--search".into(),
    search.into(),
  ];
  if let Some(n) = limit {
    args.push("--limit".into());
    args.push(n.to_string());
  }
  args
}

pub fn pr_close_args(repo: &Repo, number: u64) -> Vec<String> {
  vec!["pr".into(), "close".into(), number.to_string(), "--repo".into(), repo.to_string()]
}

/// `--force` turns create into create-or-update, so the call succeeds when the label exists.
pub fn label_create_args(repo: &Repo, label: &LabelSpec) -> Vec<String> {
  vec![
    "label".into(),
    "create".into(),
    label.name.clone(),
    "--repo".into(),
    repo.to_string(),
    "--color".into(),
    label.color.clone(),
    "--force".into(),
    "--description".into(),
    label.description.clone(),
  ]
}

/// Space-joined command line as echoed to stdout before execution.
pub fn display_command(bin: &str, args: &[String]) -> String {
  let mut parts = Vec::with_capacity(args.len() + 1);
  parts.push(bin);
  parts.extend(args.iter().map(String::as_str));
  parts.join(" ")
}

/// Runs the real `gh` binary, one synchronous process per call.
pub struct GhCli {
  bin: String,
}

impl GhCli {
  pub fn new(bin: impl Into<String>) -> Self {
    Self { bin: bin.into() }
  }

  /// Echo the command with `prefix`, run it, and return stdout. Non-zero exit is an error.
  pub fn run(&self, prefix: &str, args: &[String]) -> GhResult<String> {
    let command = display_command(&self.bin, args);
    println!("{}{}", prefix, command);
    debug!(%command, "executing");

    let out = Command::new(&self.bin).args(args).output().map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        GhError::NotFound { bin: self.bin.clone() }
      } else {
        GhError::Spawn { command: command.clone(), source: e }
      }
    })?;

    if !out.status.success() {
      let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
      let code = out.status.code().unwrap_or(-1);
      error!(code, stderr = %stderr, "gh command failed");
      return Err(GhError::CommandFailed { command, code, stderr });
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  }
}

impl GhApi for GhCli {
  fn list_pull_requests(&self, repo: &Repo, search: &str, limit: Option<u32>) -> GhResult<Vec<PullRequest>> {
    let args = pr_list_args(repo, search, limit);
    let stdout = self.run("Exec: ", &args)?;

    serde_json::from_str(&stdout).map_err(|source| GhError::Parse {
      command: display_command(&self.bin, &args),
      source,
    })
  }

  fn close_pull_request(&self, repo: &Repo, pr: &PullRequest) -> GhResult<()> {
    let prefix = format!("Closing \"{}\":\n\t", pr.title);
    self.run(&prefix, &pr_close_args(repo, pr.number))?;
    Ok(())
  }

  fn upsert_label(&self, repo: &Repo, label: &LabelSpec) -> GhResult<()> {
    self.run("Exec: ", &label_create_args(repo, label))?;
    Ok(())
  }
}
