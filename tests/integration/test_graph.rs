//! Integration tests for `svc-impact graph` and `svc-impact cycles`

use crate::helpers::{TestRepo, run_svc_impact};
use anyhow::Result;
use serde_json::json;

#[test]
fn test_graph_json() -> Result<()> {
  let repo = TestRepo::without_git()?;
  repo.add_service("payments", &["db-client", "shared-utils"])?;

  let output = run_svc_impact(&repo.path, &["graph"])?;
  assert!(output.status.success());

  let graph: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(graph, json!({ "payments": ["db-client", "shared-utils"] }));
  Ok(())
}

#[test]
fn test_graph_inverted_json() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;

  let output = run_svc_impact(&repo.path, &["graph", "--inverted"])?;
  assert!(output.status.success());

  let inverted: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let mut db_client: Vec<String> = serde_json::from_value(inverted["db-client"].clone())?;
  db_client.sort();
  assert_eq!(db_client, vec!["notifications", "payments"]);

  let mut shared: Vec<String> = serde_json::from_value(inverted["shared-utils"].clone())?;
  shared.sort();
  assert_eq!(shared, vec!["auth", "payments"]);
  assert_eq!(inverted.as_object().map(|o| o.len()), Some(2));
  Ok(())
}

#[test]
fn test_global_flags_before_subcommand() -> Result<()> {
  let repo = TestRepo::without_git()?;
  repo.add_service("payments", &["db-client"])?;
  let elsewhere = TestRepo::without_git()?;
  let root = repo.path.to_string_lossy().to_string();

  let output = run_svc_impact(&elsewhere.path, &["--root", &root, "graph"])?;
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  let graph: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(graph, json!({ "payments": ["db-client"] }));

  let output = run_svc_impact(&elsewhere.path, &["--root", &root, "cycles"])?;
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

  let output = run_svc_impact(&repo.path, &["-v", "graph", "--inverted"])?;
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  let inverted: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(inverted, json!({ "db-client": ["payments"] }));
  Ok(())
}

#[test]
fn test_graph_malformed_manifest_fails() -> Result<()> {
  let repo = TestRepo::without_git()?;
  repo.write_file("services/bad/service.yaml", "name: [oops\n")?;

  let output = run_svc_impact(&repo.path, &["graph"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Malformed service manifest"), "got: {}", stderr);
  Ok(())
}

#[test]
fn test_cycles_none() -> Result<()> {
  let repo = TestRepo::without_git()?.with_standard_services()?;

  let output = run_svc_impact(&repo.path, &["cycles"])?;
  assert!(output.status.success());
  assert!(String::from_utf8_lossy(&output.stdout).contains("No dependency cycles detected"));
  Ok(())
}

#[test]
fn test_cycles_found() -> Result<()> {
  let repo = TestRepo::without_git()?;
  repo.add_service("gateway", &["auth"])?;
  repo.add_service("auth", &["gateway"])?;

  let output = run_svc_impact(&repo.path, &["cycles"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(String::from_utf8_lossy(&output.stdout).contains("Cycle 1: auth -> gateway"));
  Ok(())
}
