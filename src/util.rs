// === Module Header (agents-tooling) START ===
// purpose: Logging setup, "now" resolution for deterministic runs, and man page rendering
// role: utilities/helpers
// inputs: RUST_LOG; optional --now-override text; clap CommandFactory
// outputs: Installed tracing subscriber; DateTime<Local>; troff text
// side_effects: init_logging installs the global subscriber (first call wins)
// invariants: Logs go to stderr so stdout stays machine-readable
// errors: parse_now rejects unrecognized timestamps with the offending text
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use clap::CommandFactory;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr `fmt` subscriber honoring `RUST_LOG` (default `warn`).
pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init();
}

/// Returns the effective "now" given an optional override.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}

/// Parse `--now-override`: RFC3339, `YYYY-MM-DDTHH:MM:SS` (local), or `YYYY-MM-DD` (local midnight).
pub fn parse_now(raw: Option<&str>) -> Result<Option<DateTime<Local>>> {
  let Some(s) = raw.map(str::trim) else {
    return Ok(None);
  };

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(Some(dt.with_timezone(&Local)));
  }

  let naive = if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
    Some(ndt)
  } else if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    d.and_hms_opt(0, 0, 0)
  } else {
    None
  };
  let Some(naive) = naive else {
    bail!("unrecognized --now-override value: {}", s)
  };

  match Local.from_local_datetime(&naive).earliest() {
    Some(dt) => Ok(Some(dt)),
    None => bail!("--now-override {} does not exist in the local timezone", s),
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
