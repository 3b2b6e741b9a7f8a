//! Error types for svc-impact with contextual messages and exit codes
//!
//! Errors are grouped by where they come from (config, manifests, git, I/O) so
//! the CLI can pick an exit code and a help hint. The affected pipeline never
//! surfaces these to the user; `main.rs` turns them into an empty result.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for svc-impact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, manifests, invalid args)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Validation failure (dependency cycles)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for svc-impact
#[derive(Debug)]
pub enum ImpactError {
  /// Configuration errors
  Config(ConfigError),

  /// Service manifest errors
  Manifest(ManifestError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
  },
}

impl ImpactError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ImpactError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  ///
  /// Only `Message` errors carry context; structured errors already name
  /// the file or command involved.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ImpactError::Message { message, context } => ImpactError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      ImpactError::Io(e) => ImpactError::Message {
        message: format!("I/O error: {}", e),
        context: Some(ctx_str),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ImpactError::Config(_) => ExitCode::User,
      ImpactError::Manifest(_) => ExitCode::User,
      ImpactError::Git(_) => ExitCode::System,
      ImpactError::Io(_) => ExitCode::System,
      ImpactError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ImpactError::Config(e) => e.help_message(),
      ImpactError::Manifest(e) => e.help_message(),
      ImpactError::Git(e) => e.help_message(),
      ImpactError::Message { .. } | ImpactError::Io(_) => None,
    }
  }
}

impl fmt::Display for ImpactError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ImpactError::Config(e) => write!(f, "{}", e),
      ImpactError::Manifest(e) => write!(f, "{}", e),
      ImpactError::Git(e) => write!(f, "{}", e),
      ImpactError::Io(e) => write!(f, "I/O error: {}", e),
      ImpactError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ImpactError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ImpactError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ImpactError {
  fn from(err: io::Error) -> Self {
    ImpactError::Io(err)
  }
}

impl From<serde_json::Error> for ImpactError {
  fn from(err: serde_json::Error) -> Self {
    ImpactError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// impact.toml could not be parsed
  Parse { path: PathBuf, reason: String },

  /// A field has a value we cannot use
  InvalidValue { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => {
        Some("Fix the TOML syntax, or delete the file to fall back to the defaults.".to_string())
      }
      ConfigError::InvalidValue { field, .. } => Some(format!("Set `{}` to a non-empty name without '/'.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse config {}: {}", path.display(), reason)
      }
      ConfigError::InvalidValue { field, reason } => {
        write!(f, "Invalid value for `{}`: {}", field, reason)
      }
    }
  }
}

/// Service manifest errors
#[derive(Debug)]
pub enum ManifestError {
  /// Not YAML, or not the `{ name, dependencies }` shape
  Malformed { path: PathBuf, reason: String },

  /// Parsed, but `name` is absent or null
  MissingName { path: PathBuf },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::Malformed { path, .. } => Some(format!(
        "Expected `name: <service>` and an optional `dependencies:` list in {}",
        path.display()
      )),
      ManifestError::MissingName { path } => Some(format!("Add a `name:` key to {}", path.display())),
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::Malformed { path, reason } => {
        write!(f, "Malformed service manifest {}: {}", path.display(), reason)
      }
      ManifestError::MissingName { path } => {
        write!(f, "Service manifest {} has no `name`", path.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command exited nonzero
  CommandFailed { command: String, stderr: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::CommandFailed { stderr, .. } => {
        if stderr.contains("not a git repository") {
          Some("Run from inside a git checkout, or pass the changed files with --changed.".to_string())
        } else {
          None
        }
      }
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
    }
  }
}

/// Result type alias for svc-impact
pub type ImpactResult<T> = Result<T, ImpactError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ImpactResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ImpactResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ImpactError>,
{
  fn context(self, ctx: impl Into<String>) -> ImpactResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ImpactResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ImpactError) {
  eprintln!("\nerror: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("help: {}\n", help);
  }
}
