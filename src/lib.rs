//! Housekeeping for an organization's provider repositories.
//!
//! Each task is a straight pass: gather records (`gh` or the filesystem), filter them with
//! pure predicates, then act. The [`gh::GhApi`] trait is the seam between filtering and acting.

pub mod cli;
pub mod dispatch;
pub mod gh;
pub mod model;
pub mod providers;
pub mod release_labels;
pub mod stale_prs;
pub mod util;
