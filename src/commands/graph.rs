//! `svc-impact graph` and `svc-impact cycles` - inspect the dependency graph

use crate::core::context::ImpactContext;
use crate::core::error::ImpactResult;
use crate::graph::{DependencyGraph, DiskTree, invert_graph, load_dependency_graph};
use clap::ValueEnum;

/// Output format for graph command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
  /// JSON object, keys in load order
  #[default]
  Json,
  /// One line per entry
  Text,
}

fn load(ctx: &ImpactContext) -> ImpactResult<DependencyGraph> {
  load_dependency_graph(&DiskTree::new(ctx.root()), &ctx.config.layout.manifest_file)
}

/// Render the forward graph, or the inverted graph with `inverted`.
pub fn run_graph(ctx: &ImpactContext, inverted: bool, format: GraphFormat) -> ImpactResult<String> {
  let graph = load(ctx)?;

  if inverted {
    let dependents = invert_graph(&graph);
    return match format {
      GraphFormat::Json => Ok(serde_json::to_string_pretty(&dependents)?),
      GraphFormat::Text => Ok(render_lines(dependents.iter(), "<-")),
    };
  }

  match format {
    GraphFormat::Json => Ok(serde_json::to_string_pretty(&graph)?),
    GraphFormat::Text => Ok(render_lines(graph.iter(), "->")),
  }
}

fn render_lines<'a>(entries: impl Iterator<Item = (&'a str, &'a [String])>, arrow: &str) -> String {
  entries
    .map(|(name, related)| {
      if related.is_empty() {
        format!("{} {} (none)", name, arrow)
      } else {
        format!("{} {} {}", name, arrow, related.join(", "))
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Cycle report: the text to print and how many cycles were found.
pub struct CycleReport {
  pub output: String,
  pub cycles: usize,
}

/// Detect dependency cycles among declared names.
pub fn run_cycles(ctx: &ImpactContext) -> ImpactResult<CycleReport> {
  let cycles = load(ctx)?.find_cycles();

  if cycles.is_empty() {
    return Ok(CycleReport {
      output: "No dependency cycles detected".to_string(),
      cycles: 0,
    });
  }

  let output = cycles
    .iter()
    .enumerate()
    .map(|(i, cycle)| format!("Cycle {}: {}", i + 1, cycle.join(" -> ")))
    .collect::<Vec<_>>()
    .join("\n");

  Ok(CycleReport {
    output,
    cycles: cycles.len(),
  })
}
