//! `svc-impact affected` - Show which services are affected by changes
//!
//! Loads the dependency graph, inverts it, collects changed files (git or
//! `--changed`) and resolves them to service names. Errors are returned, not
//! printed: the process boundary decides what a failed run prints.

use crate::core::context::ImpactContext;
use crate::core::error::ImpactResult;
use crate::core::vcs::{ChangeSource, ExplicitChanges, GitChanges, SystemGit};
use crate::graph::{AffectedAnalysis, DiskTree, analyze, invert_graph, load_dependency_graph};
use clap::ValueEnum;
use std::fmt::Write as _;
use std::path::Path;

/// Output format for affected command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  /// Single-line JSON array of service names
  #[default]
  Json,
  /// One service name per line
  Names,
  /// Human-readable breakdown
  Text,
}

/// Options for one affected run
#[derive(Debug, Clone, Default)]
pub struct AffectedArgs {
  /// Overrides `git.base` from impact.toml
  pub since: Option<String>,
  /// Explicit changed files; git is not consulted when non-empty
  pub changed: Vec<String>,
  pub format: OutputFormat,
}

/// Run the full pipeline and render its output.
pub fn run_affected(root: &Path, args: &AffectedArgs) -> ImpactResult<String> {
  let ctx = ImpactContext::build(root)?;
  let source = change_source(&ctx, args);
  let analysis = detect_affected(&ctx, source.as_ref())?;
  render(&analysis, args.format)
}

fn change_source(ctx: &ImpactContext, args: &AffectedArgs) -> Box<dyn ChangeSource> {
  if !args.changed.is_empty() {
    return Box::new(ExplicitChanges::new(args.changed.clone()));
  }

  let base = args.since.as_deref().unwrap_or(&ctx.config.git.base);
  Box::new(GitChanges::new(SystemGit::new(ctx.root()), base, ctx.config.git.head.as_str()))
}

/// Load graph → invert → collect changes → resolve.
pub fn detect_affected(ctx: &ImpactContext, changes: &dyn ChangeSource) -> ImpactResult<AffectedAnalysis> {
  let layout = &ctx.config.layout;

  let graph = load_dependency_graph(&DiskTree::new(ctx.root()), &layout.manifest_file)?;
  let inverted = invert_graph(&graph);
  let changed_files = changes.changed_files()?;

  let analysis = analyze(&changed_files, &inverted, &layout.services_dir);
  tracing::debug!(
    changed = analysis.changed_files.len(),
    direct = analysis.direct.len(),
    dependents = analysis.dependents.len(),
    "resolved affected services"
  );
  Ok(analysis)
}

/// Render an analysis in the requested format.
pub fn render(analysis: &AffectedAnalysis, format: OutputFormat) -> ImpactResult<String> {
  match format {
    OutputFormat::Json => Ok(serde_json::to_string(&analysis.affected)?),
    OutputFormat::Names => Ok(analysis.affected.iter().cloned().collect::<Vec<_>>().join("\n")),
    OutputFormat::Text => Ok(render_text(analysis)),
  }
}

/// What a failed run prints, whatever the requested format
pub fn fallback_output() -> &'static str {
  "[]"
}

fn render_text(analysis: &AffectedAnalysis) -> String {
  let mut out = String::new();

  let _ = writeln!(out, "Affected Analysis");
  let _ = writeln!(out, "=================");
  let _ = writeln!(out);

  let _ = writeln!(out, "Changed files: {}", analysis.changed_files.len());
  if !analysis.changed_files.is_empty() && analysis.changed_files.len() <= 20 {
    for file in &analysis.changed_files {
      let _ = writeln!(out, "  {}", file);
    }
    let _ = writeln!(out);
  }

  let _ = writeln!(out, "Direct impact: {} services", analysis.direct.len());
  for name in &analysis.direct {
    let _ = writeln!(out, "  {}", name);
  }
  let _ = writeln!(out);

  let _ = writeln!(out, "Dependents: {} services", analysis.dependents.len());
  for name in &analysis.dependents {
    let _ = writeln!(out, "  {}", name);
  }
  let _ = writeln!(out);

  let _ = write!(out, "Affected (direct + dependents): {} services", analysis.affected.len());
  for name in &analysis.affected {
    let _ = write!(out, "\n  {}", name);
  }

  out
}
