//! `needs-release/{major,minor,patch}` labels that drive the provider release process.

use anyhow::{Context, Result};
use tracing::info;

use crate::gh::GhApi;
use crate::model::{LabelSpec, Repo};

pub const LABEL_COLOR: &str = "#C5DEF5";

/// The three release labels with their version-bump descriptions, major first.
pub fn release_labels() -> [LabelSpec; 3] {
  let label = |kind: &str, bump: &str| LabelSpec {
    name: format!("needs-release/{}", kind),
    color: LABEL_COLOR.to_string(),
    description: format!("When a PR with this label merges, it initiates a release of {}", bump),
  };

  [label("major", "vX+1.0.0"), label("minor", "vX.Y+1.0"), label("patch", "vX.Y.Z+1")]
}

/// Create or update every release label on `repo`. Safe to repeat.
pub fn ensure_release_labels(gh: &dyn GhApi, repo: &Repo) -> Result<()> {
  for label in release_labels() {
    gh.upsert_label(repo, &label)
      .with_context(|| format!("ensuring label {} on {}", label.name, repo))?;
  }
  info!(repo = %repo, "release labels ensured");
  Ok(())
}

pub fn ensure_release_labels_all(gh: &dyn GhApi, repos: &[Repo]) -> Result<()> {
  for repo in repos {
    ensure_release_labels(gh, repo)?;
  }
  Ok(())
}
