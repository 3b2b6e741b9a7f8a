//! Integration tests for the default `affected` command

use crate::helpers::{TestRepo, affected_names, git, run_svc_impact};
use anyhow::Result;

#[test]
fn test_affected_lib_change() -> Result<()> {
  let repo = TestRepo::new()?.with_standard_services()?;
  repo.commit("Add services")?;
  git(&repo.path, &["branch", "origin/master"])?;

  repo.write_file("libs/db-client/client.py", "def connect():\n    return 1\n")?;
  repo.commit("Change db-client")?;

  assert_eq!(affected_names(&repo.path, &[])?, vec!["notifications", "payments"]);
  Ok(())
}

#[test]
fn test_affected_service_change() -> Result<()> {
  let repo = TestRepo::new()?.with_standard_services()?;
  repo.commit("Add services")?;
  git(&repo.path, &["branch", "origin/master"])?;

  repo.write_file("services/auth/app.py", "def health():\n    return {}\n")?;
  repo.commit("Change auth")?;

  assert_eq!(affected_names(&repo.path, &[])?, vec!["auth"]);
  Ok(())
}

#[test]
fn test_affected_no_changes() -> Result<()> {
  let repo = TestRepo::new()?.with_standard_services()?;
  repo.commit("Add services")?;
  git(&repo.path, &["branch", "origin/master"])?;

  let output = run_svc_impact(&repo.path, &[])?;
  assert!(output.status.success());
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
  Ok(())
}

#[test]
fn test_affected_falls_back_to_tracked_files() -> Result<()> {
  // No origin/master: the diff fails and every tracked file counts as changed
  let repo = TestRepo::new()?.with_standard_services()?;
  repo.commit("Add services")?;

  assert_eq!(
    affected_names(&repo.path, &[])?,
    vec!["auth", "notifications", "payments"]
  );
  Ok(())
}

#[test]
fn test_affected_since_ref() -> Result<()> {
  let repo = TestRepo::new()?.with_standard_services()?;
  repo.commit("Add services")?;
  git(&repo.path, &["branch", "release"])?;

  repo.write_file("libs/shared-utils/strings.py", "def slug(s):\n    return s.lower()\n")?;
  repo.commit("Change shared-utils")?;

  assert_eq!(affected_names(&repo.path, &["--since", "release"])?, vec!["auth", "payments"]);
  assert_eq!(
    affected_names(&repo.path, &["affected", "--since", "release"])?,
    vec!["auth", "payments"]
  );
  Ok(())
}

#[test]
fn test_affected_base_from_config() -> Result<()> {
  let repo = TestRepo::new()?.with_standard_services()?;
  repo.write_file("impact.toml", "[git]\nbase = \"trunk\"\n")?;
  repo.commit("Add services")?;
  git(&repo.path, &["branch", "trunk"])?;

  repo.write_file("services/notifications/app.py", "pass\n")?;
  repo.commit("Change notifications")?;

  assert_eq!(affected_names(&repo.path, &[])?, vec!["notifications"]);
  Ok(())
}

#[test]
fn test_affected_outside_git_prints_empty() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;

  let output = run_svc_impact(&repo.path, &[])?;
  assert!(output.status.success(), "failures must not fail the process");
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
  assert!(output.stderr.is_empty(), "errors are swallowed silently");
  Ok(())
}

#[test]
fn test_affected_malformed_manifest_prints_empty() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;
  repo.write_file("services/broken/service.yaml", "dependencies: [db-client]\n")?;

  let output = run_svc_impact(&repo.path, &["--changed", "libs/db-client/client.py"])?;
  assert!(output.status.success());
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
  Ok(())
}

#[test]
fn test_affected_explicit_changes() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;

  let names = affected_names(
    &repo.path,
    &["--changed", "libs/db-client/client.py", "services/auth/app.py", "main.py"],
  )?;
  assert_eq!(names, vec!["auth", "notifications", "payments"]);
  Ok(())
}

#[test]
fn test_affected_nested_service_file_uses_parent_dir() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;

  let names = affected_names(&repo.path, &["--changed", "services/payments/sub/dir/x.py"])?;
  assert_eq!(names, vec!["dir"]);
  Ok(())
}

#[test]
fn test_affected_root_option() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;
  let elsewhere = TestRepo::without_git()?;
  let root = repo.path.to_string_lossy().to_string();

  let names = affected_names(
    &elsewhere.path,
    &["affected", "--root", &root, "--changed", "libs/shared-utils/strings.py"],
  )?;
  assert_eq!(names, vec!["auth", "payments"]);
  Ok(())
}

#[test]
fn test_affected_root_before_subcommand() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;
  let elsewhere = TestRepo::without_git()?;
  let root = repo.path.to_string_lossy().to_string();

  let names = affected_names(
    &elsewhere.path,
    &["--root", &root, "affected", "--changed", "libs/db-client/client.py"],
  )?;
  assert_eq!(names, vec!["notifications", "payments"]);
  Ok(())
}

#[test]
fn test_affected_option_like_since_is_not_passed_to_git() -> Result<()> {
  let repo = TestRepo::new()?.with_standard_services()?;
  repo.commit("Add services")?;
  let out = TestRepo::without_git()?;
  let target = out.path.join("written");
  let since = format!("--since=--output={}", target.display());

  // git rejects the ref, so every tracked file counts as changed
  assert_eq!(
    affected_names(&repo.path, &[since.as_str()])?,
    vec!["auth", "notifications", "payments"]
  );
  assert!(!target.exists());
  Ok(())
}

#[test]
fn test_affected_names_format() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;

  let output = run_svc_impact(
    &repo.path,
    &["--format", "names", "--changed", "libs/db-client/client.py"],
  )?;
  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  let lines: Vec<&str> = stdout.lines().collect();
  assert_eq!(lines, vec!["notifications", "payments"]);
  Ok(())
}

#[test]
fn test_affected_text_format() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;

  let output = run_svc_impact(
    &repo.path,
    &["--format", "text", "--changed", "services/auth/app.py", "libs/db-client/client.py"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Direct impact: 1 services"), "got: {}", stdout);
  assert!(stdout.contains("Dependents: 2 services"), "got: {}", stdout);
  Ok(())
}
