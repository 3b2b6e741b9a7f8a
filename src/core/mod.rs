//! Core building blocks shared by all commands
//!
//! - **config**: impact.toml parsing and validation
//! - **context**: Root directory plus configuration, built once per run
//! - **error**: Error types with help messages and exit codes
//! - **vcs**: Changed-file sources (system git, explicit lists)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
