//! Invocation context - build once, pass to commands
//!
//! Holds the monorepo root and its configuration. The dependency graph is
//! not cached here: each command loads it itself so a malformed manifest
//! fails inside the command that needs it, where the affected command can
//! swallow it.

use crate::core::config::ImpactConfig;
use crate::core::error::ImpactResult;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImpactContext {
  /// Monorepo root directory
  pub root: PathBuf,

  /// Configuration (defaults when no impact.toml exists)
  pub config: ImpactConfig,
}

impl ImpactContext {
  /// Build context for a root directory, loading impact.toml if present.
  pub fn build(root: &Path) -> ImpactResult<Self> {
    let config = ImpactConfig::load(root)?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Get monorepo root as Path reference (convenience)
  pub fn root(&self) -> &Path {
    &self.root
  }
}
