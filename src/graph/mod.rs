//! Service dependency graph and change-impact analysis
//!
//! Loader → Inverter → Resolver:
//! - `loader`: manifests on disk → [`DependencyGraph`]
//! - `dependency_graph`: [`invert_graph`] → [`InvertedGraph`]
//! - `affected`: changed files + inverted graph → affected services

pub mod affected;
pub mod dependency_graph;
pub mod loader;

pub use affected::{AffectedAnalysis, analyze};
pub use dependency_graph::{DependencyGraph, InvertedGraph, invert_graph};
pub use loader::{DiskTree, FileTree, load_dependency_graph};
