//! CLI commands for svc-impact
//!
//! - **affected**: Find services affected by changed files (default command)
//! - **graph**: Print the dependency graph or its inverse
//! - **cycles**: Report dependency cycles among declared names
//!
//! Commands return their output as a string; `main.rs` prints it and picks
//! the exit code.

pub mod affected;
pub mod graph;

pub use affected::{AffectedArgs, OutputFormat, fallback_output, run_affected};
pub use graph::{GraphFormat, run_cycles, run_graph};
