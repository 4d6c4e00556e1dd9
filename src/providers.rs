// === Module Header (agents-tooling) START ===
// purpose: Enumerate providers from the JSON list, the provider directories, and per-provider config.yaml team assignments
// role: inputs/providers
// inputs: providers.json path; provider directory roots
// outputs: Sorted provider names; repository references; JSON array text
// side_effects: Filesystem reads only
// invariants:
// - Directory listings are sorted lexicographically by entry name
// - Team filtering validates every provider before filtering, so a missing team fails before any output
// errors: ProviderError::MissingTeam; IO/JSON errors bubble with the offending path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use thiserror::Error;
use tracing::debug;

use crate::model::Repo;

/// Providers that never get an automatic PR from the native-provider workflows.
pub const EXCLUDED_FROM_AUTO_PR: &[&str] = &["azure-native"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProviderError {
  #[error("Provider {provider} is lacking team: assignment in config.yaml")]
  MissingTeam { provider: String },
}

/// Read a JSON array of provider names, e.g. `["aws", "gcp"]`.
pub fn load_provider_names(path: &Path) -> Result<Vec<String>> {
  let raw = std::fs::read_to_string(path).with_context(|| format!("reading provider list {}", path.display()))?;
  let names: Vec<String> =
    serde_json::from_str(&raw).with_context(|| format!("parsing provider list {}", path.display()))?;

  debug!(count = names.len(), path = %path.display(), "loaded provider list");
  Ok(names)
}

/// Map provider names to `<org>/<prefix><name>`.
pub fn repos_for(names: &[String], org: &str, repo_prefix: &str) -> Vec<Repo> {
  names.iter().map(|n| Repo::new(org, format!("{}{}", repo_prefix, n))).collect()
}

/// Sorted entry names of `dir`.
pub fn list_provider_dirs(dir: &Path) -> Result<Vec<String>> {
  let entries = std::fs::read_dir(dir).with_context(|| format!("listing providers in {}", dir.display()))?;

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry.with_context(|| format!("listing providers in {}", dir.display()))?;
    let name = entry
      .file_name()
      .into_string()
      .map_err(|raw| anyhow!("non UTF-8 provider name {:?} in {}", raw, dir.display()))?;
    names.push(name);
  }
  names.sort();

  Ok(names)
}

/// Value of the first line starting with `team:`; an empty value counts as unassigned.
pub fn parse_team(config_text: &str) -> Option<String> {
  let line = config_text.lines().find(|l| l.starts_with("team:"))?;
  let team = line["team:".len()..].trim();
  if team.is_empty() {
    None
  } else {
    Some(team.to_string())
  }
}

pub fn read_team(config_path: &Path) -> Result<Option<String>> {
  let text = std::fs::read_to_string(config_path).with_context(|| format!("reading {}", config_path.display()))?;
  Ok(parse_team(&text))
}

/// Sorted providers under `dir`, optionally restricted to those maintained by `team`.
///
/// Every provider must carry a `team:` line in `<dir>/<provider>/config.yaml`.
pub fn providers_by_team(dir: &Path, team: Option<&str>) -> Result<Vec<String>> {
  let names = list_provider_dirs(dir)?;

  // Phase 1: resolve and validate every assignment
  let mut assigned: Vec<(String, String)> = Vec::with_capacity(names.len());
  for name in names {
    let config = dir.join(&name).join("config.yaml");
    match read_team(&config)? {
      Some(t) => assigned.push((name, t)),
      None => return Err(ProviderError::MissingTeam { provider: name }.into()),
    }
  }

  // Phase 2: filter
  Ok(
    assigned
      .into_iter()
      .filter(|(_, t)| team.map_or(true, |wanted| t == wanted))
      .map(|(name, _)| name)
      .collect(),
  )
}

/// Sorted native providers under `dir`; `for_auto_pr` drops [`EXCLUDED_FROM_AUTO_PR`].
pub fn native_providers(dir: &Path, for_auto_pr: bool) -> Result<Vec<String>> {
  let mut names = list_provider_dirs(dir)?;
  if for_auto_pr {
    names.retain(|n| !EXCLUDED_FROM_AUTO_PR.contains(&n.as_str()));
  }
  Ok(names)
}

/// Single-line JSON array with `", "` between items.
pub fn to_json_list(names: &[String]) -> Result<String> {
  let items: Vec<String> = names.iter().map(serde_json::to_string).collect::<Result<_, _>>()?;
  Ok(format!("[{}]", items.join(", ")))
}
