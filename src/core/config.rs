//! Configuration loading (`impact.toml`)
//!
//! All settings are optional. Values are validated once at load time so the
//! pipeline can use them as plain strings.

use crate::core::error::{ConfigError, ImpactError, ImpactResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for svc-impact
/// Searched in order: impact.toml, .impact.toml, .config/impact.toml
///
/// Every field has a default, so a missing file is the same as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImpactConfig {
  #[serde(default)]
  pub git: GitConfig,
  #[serde(default)]
  pub layout: LayoutConfig,
}

/// Refs used to compute the changed files
#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
  /// Diff base (default: "origin/master")
  #[serde(default = "default_base")]
  pub base: String,

  /// Diff head (default: "HEAD")
  #[serde(default = "default_head")]
  pub head: String,
}

fn default_base() -> String {
  "origin/master".to_string()
}

fn default_head() -> String {
  "HEAD".to_string()
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      base: default_base(),
      head: default_head(),
    }
  }
}

/// Monorepo layout conventions
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
  /// Top-level directory whose files are direct changes (default: "services")
  #[serde(default = "default_services_dir")]
  pub services_dir: String,

  /// Manifest filename (default: "service.yaml")
  #[serde(default = "default_manifest_file")]
  pub manifest_file: String,
}

fn default_services_dir() -> String {
  "services".to_string()
}

fn default_manifest_file() -> String {
  "service.yaml".to_string()
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      services_dir: default_services_dir(),
      manifest_file: default_manifest_file(),
    }
  }
}

impl GitConfig {
  /// Refs are passed to git as arguments, never as options
  pub fn validate(&self) -> ImpactResult<()> {
    check_ref("git.base", &self.base)?;
    check_ref("git.head", &self.head)?;
    Ok(())
  }
}

fn check_ref(field: &str, value: &str) -> ImpactResult<()> {
  let reason = if value.is_empty() {
    "must not be empty"
  } else if value.starts_with('-') {
    "must not start with '-'"
  } else {
    return Ok(());
  };

  Err(ImpactError::Config(ConfigError::InvalidValue {
    field: field.to_string(),
    reason: reason.to_string(),
  }))
}

impl LayoutConfig {
  /// Both values are compared against single path segments
  pub fn validate(&self) -> ImpactResult<()> {
    check_segment("layout.services_dir", &self.services_dir)?;
    check_segment("layout.manifest_file", &self.manifest_file)?;
    Ok(())
  }
}

fn check_segment(field: &str, value: &str) -> ImpactResult<()> {
  let reason = if value.is_empty() {
    "must not be empty"
  } else if value.contains('/') {
    "must be a single path segment"
  } else {
    return Ok(());
  };

  Err(ImpactError::Config(ConfigError::InvalidValue {
    field: field.to_string(),
    reason: reason.to_string(),
  }))
}

impl ImpactConfig {
  /// Find config file in search order: impact.toml, .impact.toml, .config/impact.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("impact.toml"),
      path.join(".impact.toml"),
      path.join(".config").join("impact.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> ImpactResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no impact.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content, &config_path)?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }

  /// Parse and validate config text; `path` is only used in errors
  pub fn parse(content: &str, path: &Path) -> ImpactResult<Self> {
    let config: ImpactConfig = toml_edit::de::from_str(content).map_err(|e| {
      ImpactError::Config(ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })?;

    config.git.validate()?;
    config.layout.validate()?;

    Ok(config)
  }
}
