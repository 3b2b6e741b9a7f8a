//! Sources of changed file paths
//!
//! The impact resolver only needs a list of repository-relative paths. Where
//! that list comes from is behind [`ChangeSource`]: system git in normal runs,
//! an explicit list when paths are passed on the command line.

pub mod system_git;

pub use system_git::{GitChanges, SystemGit};

use crate::core::error::ImpactResult;

/// Provides the changed files for one run.
pub trait ChangeSource {
  /// Repository-relative paths with `/` separators, in source order.
  fn changed_files(&self) -> ImpactResult<Vec<String>>;
}

/// A fixed list of paths, e.g. from `--changed`.
#[derive(Debug, Clone)]
pub struct ExplicitChanges {
  files: Vec<String>,
}

impl ExplicitChanges {
  pub fn new(files: Vec<String>) -> Self {
    Self { files }
  }
}

impl ChangeSource for ExplicitChanges {
  fn changed_files(&self) -> ImpactResult<Vec<String>> {
    Ok(
      self
        .files
        .iter()
        .filter(|f| !f.is_empty())
        .cloned()
        .collect(),
    )
  }
}

/// Split newline-separated command output into paths.
///
/// Only the output as a whole is trimmed; paths keep their own whitespace.
/// Blank lines are dropped, so empty output yields an empty list rather than
/// a single empty path.
pub(crate) fn parse_name_list(stdout: &str) -> Vec<String> {
  stdout
    .trim()
    .lines()
    .filter(|line| !line.is_empty())
    .map(String::from)
    .collect()
}
