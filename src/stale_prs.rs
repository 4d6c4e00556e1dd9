// === Module Header (agents-tooling) START ===
// purpose: Close bot-authored PRs that were opened for testing and never queued for auto-merge
// role: task/stale-prs
// inputs: GhApi backend, repository list, StalePrPolicy (bot login, lifetime, now)
// outputs: ClosedPr entries for every PR a close was issued for
// side_effects: One `gh pr list` per repository; one `gh pr close` per qualifying PR
// invariants:
// - A PR with an auto-merge request, a foreign author, or any label is never closed
// - Cutoff is exclusive: created on the cutoff date => kept; created earlier => eligible
// errors: First failing gh call aborts the run with the repository as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::gh::GhApi;
use crate::model::{PullRequest, Repo};

/// Bot account whose test PRs are cleaned up.
pub const DEFAULT_BOT: &str = "pulumi-bot";

/// Days a non-auto-merge bot PR may stay open after creation.
pub const PR_LIFETIME_DAYS: u32 = 3;

#[derive(Debug, Clone)]
pub struct StalePrPolicy {
  pub bot: String,
  pub cutoff: NaiveDate,
  pub limit: Option<u32>,
}

impl StalePrPolicy {
  pub fn new(bot: impl Into<String>, now: DateTime<Local>, lifetime_days: u32, limit: Option<u32>) -> Self {
    Self { bot: bot.into(), cutoff: cutoff_date(now, lifetime_days), limit }
  }

  pub fn search_query(&self) -> String {
    search_query(&self.bot, self.cutoff)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// Queued for merge; the bot meant to land it
  AutoMerge,
  ForeignAuthor,
  /// A human is managing it (e.g. `needs-release/patch`)
  Labeled,
  TooRecent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  Close,
  Skip(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosedPr {
  pub repo: String,
  pub number: u64,
  pub title: String,
}

pub fn cutoff_date(now: DateTime<Local>, lifetime_days: u32) -> NaiveDate {
  (now - Duration::days(i64::from(lifetime_days))).date_naive()
}

/// GitHub search qualifiers selecting the bot's PRs created strictly before `cutoff`.
pub fn search_query(bot: &str, cutoff: NaiveDate) -> String {
  format!("author:{} created:<{}", bot, cutoff.format("%Y-%m-%d"))
}

/// Decide whether `pr` should be closed. Checks run in a fixed order so the reported reason is stable.
pub fn verdict(pr: &PullRequest, bot: &str, cutoff: NaiveDate) -> Verdict {
  if pr.has_auto_merge() {
    return Verdict::Skip(SkipReason::AutoMerge);
  }
  if pr.author_login() != Some(bot) {
    return Verdict::Skip(SkipReason::ForeignAuthor);
  }
  if pr.is_labeled() {
    return Verdict::Skip(SkipReason::Labeled);
  }
  // The search already applies the cutoff; re-check when the record carries its timestamp.
  if let Some(created) = pr.created_at {
    if created.date_naive() >= cutoff {
      return Verdict::Skip(SkipReason::TooRecent);
    }
  }
  Verdict::Close
}

/// List the bot's old PRs in `repo` and close every one that passes [`verdict`].
pub fn close_outdated(gh: &dyn GhApi, repo: &Repo, policy: &StalePrPolicy) -> Result<Vec<ClosedPr>> {
  // Phase 1: gather
  let prs = gh
    .list_pull_requests(repo, &policy.search_query(), policy.limit)
    .with_context(|| format!("listing pull requests in {}", repo))?;

  // Phase 2: filter and act
  let mut closed = Vec::new();
  for pr in &prs {
    match verdict(pr, &policy.bot, policy.cutoff) {
      Verdict::Skip(reason) => {
        debug!(repo = %repo, number = pr.number, ?reason, "skipping");
      }
      Verdict::Close => {
        gh.close_pull_request(repo, pr)
          .with_context(|| format!("closing #{} in {}", pr.number, repo))?;
        closed.push(ClosedPr { repo: repo.to_string(), number: pr.number, title: pr.title.clone() });
      }
    }
  }

  info!(repo = %repo, listed = prs.len(), closed = closed.len(), "stale PR pass done");
  Ok(closed)
}

/// Run [`close_outdated`] over every repository in order, stopping at the first failure.
pub fn close_outdated_all(gh: &dyn GhApi, repos: &[Repo], policy: &StalePrPolicy) -> Result<Vec<ClosedPr>> {
  let mut all = Vec::new();
  for repo in repos {
    all.extend(close_outdated(gh, repo, policy)?);
  }
  Ok(all)
}
