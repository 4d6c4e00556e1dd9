use thiserror::Error;

/// Failures of a `gh` invocation.
#[derive(Error, Debug)]
pub enum GhError {
  /// The executable could not be found on PATH
  #[error("{bin} not found - ensure the GitHub CLI is installed and on PATH")]
  NotFound { bin: String },

  #[error("failed to spawn {command}: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// Non-zero exit; stderr is kept verbatim
  #[error("`{command}` failed (exit code {code}): {stderr}")]
  CommandFailed { command: String, code: i32, stderr: String },

  #[error("failed to parse JSON output of `{command}`: {source}")]
  Parse {
    command: String,
    #[source]
    source: serde_json::Error,
  },
}

pub type GhResult<T> = Result<T, GhError>;
