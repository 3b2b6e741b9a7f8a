//! Find the services in a monorepo affected by a set of changed files.
//!
//! Services declare their dependencies in `service.yaml` manifests. The
//! graph is inverted once and each changed file is mapped to the services
//! it touches, directly or through one dependency hop.

pub mod commands;
pub mod core;
pub mod graph;
