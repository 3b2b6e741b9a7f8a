//! Affected service analysis
//!
//! Given a set of changed files, classify each by its containing directory:
//! - **Direct**: the directory starts with the services directory; the
//!   file's immediate parent directory names the affected service
//! - **Indirect**: anything else; the immediate parent directory is looked up
//!   in the inverted graph and every dependent is affected
//!
//! Exactly one hop: dependents of dependents are not followed.

use super::dependency_graph::InvertedGraph;
use std::collections::BTreeSet;

/// Default top-level directory for service sources.
pub const DEFAULT_SERVICES_DIR: &str = "services";

/// Complete affected analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedAnalysis {
  /// Files that changed
  pub changed_files: Vec<String>,

  /// Services named by files under the services directory
  pub direct: BTreeSet<String>,

  /// Services reached through the inverted graph
  pub dependents: BTreeSet<String>,

  /// Union of `direct` and `dependents`
  pub affected: BTreeSet<String>,
}

impl AffectedAnalysis {
  pub fn is_empty(&self) -> bool {
    self.affected.is_empty()
  }
}

/// Containing directory of a `/`-separated path: everything before the final
/// segment, with trailing separators removed. A directory made only of
/// separators is kept as is; a bare filename has the empty directory.
fn parent_dir(file: &str) -> &str {
  let Some(idx) = file.rfind('/') else {
    return "";
  };
  let head = &file[..=idx];
  let trimmed = head.trim_end_matches('/');
  if trimmed.is_empty() { head } else { trimmed }
}

/// Analyze which services are affected by file changes.
///
/// The direct rule takes the LAST directory segment, so
/// `services/payments/sub/dir/x.py` yields `dir`. Layouts must keep each
/// service's files directly under `<services_dir>/<name>/`.
///
/// Never fails; unknown directories contribute nothing.
pub fn analyze(changed_files: &[impl AsRef<str>], inverted: &InvertedGraph, services_dir: &str) -> AffectedAnalysis {
  let mut direct = BTreeSet::new();
  let mut dependents = BTreeSet::new();

  for file in changed_files {
    let dir = parent_dir(file.as_ref());
    let first = dir.split('/').next().unwrap_or_default();
    let last = dir.rsplit('/').next().unwrap_or_default();

    if first == services_dir {
      direct.insert(last.to_string());
    } else {
      dependents.extend(inverted.dependents_of(last).iter().cloned());
    }
  }

  let affected = direct.union(&dependents).cloned().collect();

  AffectedAnalysis {
    changed_files: changed_files.iter().map(|f| f.as_ref().to_string()).collect(),
    direct,
    dependents,
    affected,
  }
}

/// Set of services affected by `changed_files`, using the default layout.
pub fn get_affected_services(changed_files: &[impl AsRef<str>], inverted: &InvertedGraph) -> BTreeSet<String> {
  analyze(changed_files, inverted, DEFAULT_SERVICES_DIR).affected
}
