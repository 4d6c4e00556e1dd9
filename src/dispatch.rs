// === Module Header (agents-tooling) START ===
// purpose: Run the task selected on the command line against a GhApi backend and an output sink
// role: processing/orchestrator
// inputs: EffectiveConfig; GhApi backend; stdout-like writer
// outputs: JSON arrays for the list tasks; closer/labeler echo their commands via the backend
// side_effects: Whatever the backend does; writes list output to `out`
// invariants:
// - List output is written only after the full list is computed and validated
// - Dry-run wraps the backend so no mutating gh call escapes
// errors: Propagates config, filesystem and gh errors unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{EffectiveConfig, RepoSource, Task};
use crate::gh::{DryRunGh, GhApi, GhCli};
use crate::model::Repo;
use crate::providers;
use crate::release_labels;
use crate::stale_prs::{self, StalePrPolicy};
use crate::util;

/// Entry point used by the binary: real `gh`, real stdout.
pub fn run(cfg: &EffectiveConfig) -> Result<()> {
  let gh = GhCli::new(cfg.gh_bin.clone());
  let mut out = std::io::stdout();
  run_with(cfg, &gh, &mut out)
}

pub fn run_with(cfg: &EffectiveConfig, gh: &dyn GhApi, out: &mut dyn Write) -> Result<()> {
  debug!(config = %serde_json::to_string(cfg)?, "effective config");

  match &cfg.task {
    Task::CloseOutdatedPrs { source, bot, lifetime_days, limit, dry_run } => {
      let now = util::effective_now(util::parse_now(cfg.now_override.as_deref())?);
      let policy = StalePrPolicy::new(bot.clone(), now, *lifetime_days, *limit);
      let repos = load_repos(source)?;
      info!(repos = repos.len(), cutoff = %policy.cutoff, "closing outdated PRs");

      let closed = if *dry_run {
        stale_prs::close_outdated_all(&DryRunGh::new(gh, cfg.gh_bin.as_str()), &repos, &policy)?
      } else {
        stale_prs::close_outdated_all(gh, &repos, &policy)?
      };
      info!(closed = closed.len(), "done");
    }
    Task::EnsureReleaseLabels { source, dry_run } => {
      let repos = load_repos(source)?;
      if *dry_run {
        release_labels::ensure_release_labels_all(&DryRunGh::new(gh, cfg.gh_bin.as_str()), &repos)?;
      } else {
        release_labels::ensure_release_labels_all(gh, &repos)?;
      }
    }
    Task::ProvidersList { providers_dir, team } => {
      let names = providers::providers_by_team(providers_dir, team.as_deref())?;
      writeln!(out, "{}", providers::to_json_list(&names)?)?;
    }
    Task::NativeProvidersList { providers_dir, for_auto_pr } => {
      let names = providers::native_providers(providers_dir, *for_auto_pr)?;
      writeln!(out, "{}", providers::to_json_list(&names)?)?;
    }
  }

  Ok(())
}

fn load_repos(source: &RepoSource) -> Result<Vec<Repo>> {
  let names = providers::load_provider_names(&source.providers_file)?;
  Ok(providers::repos_for(&names, &source.org, &source.repo_prefix))
}
