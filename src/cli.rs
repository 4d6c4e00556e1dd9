use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::stale_prs::{DEFAULT_BOT, PR_LIFETIME_DAYS};

#[derive(Parser, Debug)]
#[command(
    name = "provider-ops",
    version,
    about = "Housekeeping for provider repositories: stale bot PRs, release labels, CI provider lists",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// GitHub CLI executable to invoke
  #[arg(long, global = true, default_value = "gh", hide = true)]
  pub gh_bin: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for the PR cutoff (hidden; tests only)
  #[arg(long = "now-override", global = true, hide = true)]
  pub now_override: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Close bot PRs older than the PR lifetime that are neither auto-merging nor labeled
  CloseOutdatedPrs(CloseOutdatedArgs),

  /// Create or update the needs-release/{major,minor,patch} labels on every provider repo
  EnsureReleaseLabels(EnsureLabelsArgs),

  /// Print the bridged providers as a JSON array
  ProvidersList(ProvidersListArgs),

  /// Print the native providers as a JSON array
  NativeProvidersList(NativeProvidersListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RepoSourceArgs {
  /// JSON array of provider names
  #[arg(long, default_value = "provider-ci/providers.json")]
  pub providers_file: PathBuf,

  /// Organization owning the provider repositories
  #[arg(long, default_value = "pulumi")]
  pub org: String,

  /// Repository name prefix prepended to each provider name
  #[arg(long, default_value = "pulumi-")]
  pub repo_prefix: String,
}

#[derive(Args, Debug, Clone)]
pub struct CloseOutdatedArgs {
  #[command(flatten)]
  pub source: RepoSourceArgs,

  /// Login of the bot whose PRs are cleaned up
  #[arg(long, default_value = DEFAULT_BOT)]
  pub bot: String,

  /// Days a bot PR may stay open before it is eligible for closing
  #[arg(long, default_value_t = PR_LIFETIME_DAYS)]
  pub lifetime_days: u32,

  /// Maximum number of PRs fetched per repository (gh default when omitted)
  #[arg(long)]
  pub limit: Option<u32>,

  /// List what would be closed without closing anything
  #[arg(long)]
  pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EnsureLabelsArgs {
  #[command(flatten)]
  pub source: RepoSourceArgs,

  /// Print the label commands without running them
  #[arg(long)]
  pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProvidersListArgs {
  /// Directory with one subdirectory (holding config.yaml) per provider
  #[arg(long, default_value = "../provider-ci/providers")]
  pub providers_dir: PathBuf,

  /// Maintainer team such as 'providers' or 'ecosystem'
  #[arg(long)]
  pub team: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct NativeProvidersListArgs {
  #[arg(long, default_value = "../native-provider-ci/providers")]
  pub providers_dir: PathBuf,

  /// Only return the providers that should get an automatic PR
  #[arg(long)]
  pub for_auto_pr: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSource {
  pub providers_file: PathBuf,
  pub org: String,
  pub repo_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "kebab-case")]
pub enum Task {
  CloseOutdatedPrs {
    source: RepoSource,
    bot: String,
    lifetime_days: u32,
    limit: Option<u32>,
    dry_run: bool,
  },
  EnsureReleaseLabels {
    source: RepoSource,
    dry_run: bool,
  },
  ProvidersList {
    providers_dir: PathBuf,
    team: Option<String>,
  },
  NativeProvidersList {
    providers_dir: PathBuf,
    for_auto_pr: bool,
  },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub task: Task,
  pub gh_bin: String,
  pub now_override: Option<String>,
}

fn repo_source(args: RepoSourceArgs) -> Result<RepoSource> {
  if args.org.trim().is_empty() {
    bail!("--org must not be empty");
  }
  Ok(RepoSource { providers_file: args.providers_file, org: args.org, repo_prefix: args.repo_prefix })
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let task = match cli.command {
    Some(Commands::CloseOutdatedPrs(a)) => {
      if a.lifetime_days == 0 {
        bail!("--lifetime-days must be at least 1");
      }
      if a.limit == Some(0) {
        bail!("--limit must be at least 1");
      }
      if a.bot.trim().is_empty() {
        bail!("--bot must not be empty");
      }
      Task::CloseOutdatedPrs {
        source: repo_source(a.source)?,
        bot: a.bot,
        lifetime_days: a.lifetime_days,
        limit: a.limit,
        dry_run: a.dry_run,
      }
    }
    Some(Commands::EnsureReleaseLabels(a)) => Task::EnsureReleaseLabels { source: repo_source(a.source)?, dry_run: a.dry_run },
    Some(Commands::ProvidersList(a)) => {
      // An empty --team would match nothing; treat it as absent like an unset flag
      let team = a.team.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
      Task::ProvidersList { providers_dir: a.providers_dir, team }
    }
    Some(Commands::NativeProvidersList(a)) => {
      Task::NativeProvidersList { providers_dir: a.providers_dir, for_auto_pr: a.for_auto_pr }
    }
    None => bail!("Provide a subcommand: close-outdated-prs | ensure-release-labels | providers-list | native-providers-list"),
  };

  Ok(EffectiveConfig { task, gh_bin: cli.gh_bin, now_override: cli.now_override })
}
