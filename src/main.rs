use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use svc_impact::commands::{self, AffectedArgs, GraphFormat, OutputFormat};
use svc_impact::core::context::ImpactContext;
use svc_impact::core::error::{ExitCode, ImpactError, print_error};
use tracing_subscriber::EnvFilter;

/// Find the services in a monorepo affected by a set of changed files
#[derive(Parser)]
#[command(name = "svc-impact")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,

  /// Options for the default `affected` command
  #[command(flatten)]
  affected: AffectedOpts,

  /// Monorepo root (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// Log pipeline steps to stderr
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Show which services are affected by changes (default)
  Affected(AffectedOpts),

  /// Print the service dependency graph
  Graph {
    /// Print dependency → dependents instead
    #[arg(long)]
    inverted: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = GraphFormat::Json)]
    format: GraphFormat,
  },

  /// Report dependency cycles between services
  Cycles,
}

#[derive(Args, Clone)]
struct AffectedOpts {
  /// Git ref to diff against (default: git.base from impact.toml, or origin/master)
  #[arg(long)]
  since: Option<String>,
  /// Use these changed files instead of asking git
  #[arg(long, num_args = 1..)]
  changed: Vec<String>,
  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
  format: OutputFormat,
}

impl From<AffectedOpts> for AffectedArgs {
  fn from(opts: AffectedOpts) -> Self {
    Self {
      since: opts.since,
      changed: opts.changed,
      format: opts.format,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(verbose: bool) {
  // Quiet by default: stdout carries the result, stderr stays empty
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let root = cli.root.unwrap_or_else(|| PathBuf::from("."));

  match cli.command.unwrap_or(Commands::Affected(cli.affected)) {
    Commands::Affected(opts) => {
      // Any failure degrades to "nothing affected"; never a failing exit
      match commands::run_affected(&root, &opts.into()) {
        Ok(output) => println!("{}", output),
        Err(err) => {
          tracing::debug!(error = %err, "affected pipeline failed, printing empty result");
          println!("{}", commands::fallback_output());
        }
      }
    }
    Commands::Graph { inverted, format } => {
      let output = ImpactContext::build(&root).and_then(|ctx| commands::run_graph(&ctx, inverted, format));
      match output {
        Ok(output) => println!("{}", output),
        Err(err) => handle_error(err),
      }
    }
    Commands::Cycles => match ImpactContext::build(&root).and_then(|ctx| commands::run_cycles(&ctx)) {
      Ok(report) => {
        println!("{}", report.output);
        if report.cycles > 0 {
          std::process::exit(ExitCode::Validation.as_i32());
        }
      }
      Err(err) => handle_error(err),
    },
  }
}

fn handle_error(err: ImpactError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
