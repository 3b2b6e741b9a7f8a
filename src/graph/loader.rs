//! Dependency graph loading from `service.yaml` manifests
//!
//! Each service directory carries one manifest:
//!
//! ```yaml
//! name: payments
//! dependencies:
//!   - db-client
//!   - shared-utils
//! ```
//!
//! The filesystem is reached through [`FileTree`] so tests can load from an
//! in-memory tree.

use super::dependency_graph::DependencyGraph;
use crate::core::error::{ImpactError, ImpactResult, ManifestError, ResultExt};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory-entry provider for the loader.
pub trait FileTree {
  /// Every file under the root, recursively.
  fn files(&self) -> ImpactResult<Vec<PathBuf>>;

  /// Read one of the paths returned by [`FileTree::files`].
  fn read_to_string(&self, path: &Path) -> ImpactResult<String>;
}

/// A real directory tree, walked with `walkdir`.
pub struct DiskTree {
  root: PathBuf,
}

impl DiskTree {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }
}

impl FileTree for DiskTree {
  fn files(&self) -> ImpactResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(&self.root) {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          // Unreadable directories are skipped, not fatal
          tracing::warn!(error = %e, "skipping unreadable path");
          continue;
        }
      };
      if entry.file_type().is_dir() {
        continue;
      }
      files.push(entry.into_path());
    }

    Ok(files)
  }

  fn read_to_string(&self, path: &Path) -> ImpactResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
  }
}

/// One service manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceManifest {
  pub name: String,
  pub dependencies: Vec<String>,
}

/// On-disk shape; `name` is checked after parsing so a missing name gets its
/// own error instead of a generic serde message.
#[derive(Deserialize)]
struct RawManifest {
  #[serde(default)]
  name: Option<String>,
  #[serde(default)]
  dependencies: Option<Vec<String>>,
}

impl ServiceManifest {
  /// Parse manifest text; `path` is only used in errors.
  pub fn parse(content: &str, path: &Path) -> ImpactResult<Self> {
    let raw: RawManifest = serde_yaml_ng::from_str(content).map_err(|e| {
      ImpactError::Manifest(ManifestError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })?;

    let name = raw.name.ok_or_else(|| {
      ImpactError::Manifest(ManifestError::MissingName {
        path: path.to_path_buf(),
      })
    })?;

    Ok(Self {
      name,
      dependencies: raw.dependencies.unwrap_or_default(),
    })
  }
}

/// Whether `path` names a manifest: its final component must equal
/// `manifest_file` exactly, so `myservice.yaml` is not one.
pub fn is_manifest(path: &Path, manifest_file: &str) -> bool {
  path.file_name().is_some_and(|name| name == manifest_file)
}

/// Build the dependency graph from every manifest in `tree`.
///
/// No manifests gives an empty graph. A manifest that fails to parse stops
/// the load; no partial graph is returned. When two manifests declare the
/// same name, the later one in traversal order wins.
pub fn load_dependency_graph(tree: &dyn FileTree, manifest_file: &str) -> ImpactResult<DependencyGraph> {
  let mut graph = DependencyGraph::new();

  for path in tree.files()? {
    if !is_manifest(&path, manifest_file) {
      continue;
    }

    let content = tree.read_to_string(&path)?;
    let manifest = ServiceManifest::parse(&content, &path)?;

    if graph.insert(manifest.name.clone(), manifest.dependencies).is_some() {
      tracing::debug!(service = %manifest.name, path = %path.display(), "duplicate service name, overwriting");
    }
  }

  tracing::debug!(services = graph.len(), "loaded dependency graph");
  Ok(graph)
}
