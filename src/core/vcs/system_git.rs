//! System git backend
//!
//! Shells out to the `git` binary. Exactly two commands are ever used here:
//! `git diff --name-only --end-of-options <base> <head>` and, when that exits
//! nonzero, `git ls-files` as the single fallback.

use super::{ChangeSource, parse_name_list};
use crate::core::error::{GitError, ImpactError, ImpactResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Directory git runs in (`git -C`)
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Point at a repository directory.
  ///
  /// No subprocess is spawned until a query runs, so a missing repository
  /// shows up as a failed diff and then a failed fallback.
  pub fn new(path: &Path) -> Self {
    Self {
      repo_path: path.to_path_buf(),
    }
  }

  /// Files that differ between two refs (`git diff --name-only base head`).
  ///
  /// Refs follow `--end-of-options`, so a ref that looks like a flag is
  /// rejected by git instead of being parsed as one. Returns `Ok(None)` when git ran but exited nonzero (unknown ref, not a
  /// repository, ...), leaving the fallback decision to the caller.
  pub fn diff_names(&self, base: &str, head: &str) -> ImpactResult<Option<Vec<String>>> {
    let output = self
      .git_cmd()
      .args(["diff", "--name-only", "--end-of-options", base, head])
      .output()
      .context("Failed to execute git diff")?;

    if !output.status.success() {
      tracing::debug!(
        base,
        head,
        stderr = %String::from_utf8_lossy(&output.stderr).trim(),
        "git diff failed"
      );
      return Ok(None);
    }

    Ok(Some(parse_name_list(&String::from_utf8_lossy(&output.stdout))))
  }

  /// Every tracked file (`git ls-files`).
  pub fn tracked_files(&self) -> ImpactResult<Vec<String>> {
    let output = self
      .git_cmd()
      .arg("ls-files")
      .output()
      .context("Failed to execute git ls-files")?;

    let stdout = require_success(output, "git ls-files")?;
    Ok(parse_name_list(&stdout))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Disables path quoting so non-ASCII names come back verbatim
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

fn require_success(output: Output, command: &str) -> ImpactResult<String> {
  if !output.status.success() {
    return Err(ImpactError::Git(GitError::CommandFailed {
      command: command.to_string(),
      stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }));
  }
  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Changed files from git: diff against a base ref, or every tracked file
/// when the diff cannot be computed.
pub struct GitChanges {
  git: SystemGit,
  base: String,
  head: String,
}

impl GitChanges {
  pub fn new(git: SystemGit, base: impl Into<String>, head: impl Into<String>) -> Self {
    Self {
      git,
      base: base.into(),
      head: head.into(),
    }
  }
}

impl ChangeSource for GitChanges {
  fn changed_files(&self) -> ImpactResult<Vec<String>> {
    if let Some(files) = self.git.diff_names(&self.base, &self.head)? {
      tracing::debug!(count = files.len(), base = %self.base, "changed files from git diff");
      return Ok(files);
    }

    tracing::debug!("falling back to git ls-files");
    let files = self.git.tracked_files()?;
    tracing::debug!(count = files.len(), "changed files from git ls-files");
    Ok(files)
  }
}
