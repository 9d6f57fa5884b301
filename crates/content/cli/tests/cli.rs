//! Integration tests for the `contentctl` binary.
//!
//! Requests are written to temp files and the binary is run as a real
//! subprocess. Logs go to stderr; command output goes to stdout.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

// ─── Helpers ───────────────────────────────────────────────────────

fn contentctl() -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("contentctl");
    cmd.env_remove("CONTENT_CONFIG")
        .env_remove("CONTENT_STATUS__STRICT")
        .env_remove("RUST_LOG");
    cmd
}

fn request_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create request file");
    file.write_all(contents.as_bytes()).expect("write request file");
    file
}

const FLAT_TREE: &str = r#"{
  "tree": [
    { "id": "a", "level": 0, "order": 0 },
    { "id": "b", "level": 0, "order": 1 },
    { "id": "c", "level": 0, "order": 2,
      "children": [
        { "id": "c1", "parentId": "c", "level": 1, "order": 0 },
        { "id": "c2", "parentId": "c", "level": 1, "order": 1 }
      ] }
  ],
  "draggedId": "c",
  "targetId": "a",
  "position": "before"
}"#;

// ─── Resources ─────────────────────────────────────────────────────

#[test]
fn resources_lists_irregular_plurals() {
    contentctl()
        .args(["--output", "json", "resources"])
        .assert()
        .success()
        .stdout(contains("\"resourceType\": \"industry\""))
        .stdout(contains("\"resource\": \"industries\""))
        .stdout(contains("google-maps"));
}

// ─── Access ────────────────────────────────────────────────────────

#[test]
fn access_reports_denial_reasons() {
    let request = request_file(
        ".json",
        r#"{
          "subject": { "status": "published", "resourceType": "page", "createdBy": "u1" },
          "actor": { "id": "u2", "role": "viewer" }
        }"#,
    );

    let output = contentctl()
        .args(["--output", "json", "access", "--request"])
        .arg(request.path())
        .output()
        .expect("run contentctl");

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["canEdit"]["allowed"], false);
    assert_eq!(
        summary["canEdit"]["reason"],
        "You do not have permission to edit pages."
    );
    assert_eq!(
        summary["canReorder"]["reason"],
        "Cannot reorder pages in published status."
    );
}

#[test]
fn access_uses_configured_capabilities() {
    let config = request_file(
        ".yaml",
        "capabilities:\n  reviewer:\n    pages: [update]\n",
    );
    let request = request_file(
        ".yaml",
        "subject:\n  status: in_review\n  resourceType: page\nactor:\n  id: 7\n  role:\n    slug: Reviewer\n",
    );

    let output = contentctl()
        .arg("--config")
        .arg(config.path())
        .args(["--output", "json", "access", "--request"])
        .arg(request.path())
        .output()
        .expect("run contentctl");

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["canEdit"]["allowed"], true);
    assert_eq!(summary["canReorder"]["allowed"], true);
    assert_eq!(summary["canDelete"]["allowed"], false);
}

#[test]
fn access_table_marks_each_decision() {
    let request = request_file(
        ".json",
        r#"{ "subject": { "status": "draft", "resourceType": "page" }, "actor": { "role": "admin" } }"#,
    );

    contentctl()
        .args(["access", "--request"])
        .arg(request.path())
        .assert()
        .success()
        .stdout(contains("edit").and(contains("create_child")).and(contains("reorder")));
}

#[test]
fn strict_status_from_environment_rejects_unknown_status() {
    let request = request_file(
        ".json",
        r#"{ "subject": { "status": "retired", "resourceType": "page" }, "actor": { "role": "admin" } }"#,
    );

    contentctl()
        .env("CONTENT_STATUS__STRICT", "true")
        .args(["access", "--request"])
        .arg(request.path())
        .assert()
        .code(1)
        .stderr(contains("Unknown workflow status: retired"));
}

#[test]
fn missing_request_file_fails() {
    contentctl()
        .args(["access", "--request", "/nonexistent/request.json"])
        .assert()
        .code(1)
        .stderr(contains("IO error"));
}

// ─── Plan ──────────────────────────────────────────────────────────

#[test]
fn plan_moves_root_among_roots() {
    let request = request_file(".json", FLAT_TREE);

    let output = contentctl()
        .args(["--output", "json", "plan", "--request"])
        .arg(request.path())
        .output()
        .expect("run contentctl");

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = report["plan"]["assignments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert_eq!(report["plan"]["toIndex"], 0);
    assert!(report.get("tree").is_none());
}

#[test]
fn plan_apply_prints_reordered_tree() {
    let request = request_file(".json", FLAT_TREE);

    contentctl()
        .args(["--output", "yaml", "plan", "--apply", "--request"])
        .arg(request.path())
        .assert()
        .success()
        .stdout(contains("tree:"))
        .stdout(contains("draggedId: c"));
}

#[test]
fn plan_rejects_nesting_a_root() {
    let request = request_file(
        ".json",
        &FLAT_TREE.replace("\"position\": \"before\"", "\"position\": \"inside\""),
    );

    contentctl()
        .args(["plan", "--request"])
        .arg(request.path())
        .assert()
        .code(2)
        .stdout(contains("root-isolation-violation"))
        .stderr(contains("Structural rejection"));
}

#[test]
fn plan_rejects_reparenting_as_json() {
    let request = request_file(
        ".json",
        &FLAT_TREE
            .replace("\"draggedId\": \"c\"", "\"draggedId\": \"c1\"")
            .replace("\"targetId\": \"a\"", "\"targetId\": \"b\""),
    );

    let output = contentctl()
        .args(["--output", "json", "plan", "--request"])
        .arg(request.path())
        .output()
        .expect("run contentctl");

    assert_eq!(output.status.code(), Some(2));
    let rejection: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rejection["kind"], "reparent-violation");
    assert_eq!(rejection["dragged"], "c1");
}

#[test]
fn plan_checks_reorder_permission_when_subject_given() {
    let request = request_file(
        ".json",
        &FLAT_TREE.replace(
            "\"position\": \"before\"",
            r#""position": "before",
  "subject": { "status": "published", "resourceType": "page" },
  "actor": { "id": "u2", "role": "reviewer" }"#,
        ),
    );

    contentctl()
        .args(["plan", "--request"])
        .arg(request.path())
        .assert()
        .code(2)
        .stdout(contains("Cannot reorder pages in published status."))
        .stderr(contains("reorder denied"));
}

// ─── Config ────────────────────────────────────────────────────────

#[test]
fn config_shows_defaults() {
    contentctl()
        .args(["--output", "json", "config"])
        .assert()
        .success()
        .stdout(contains("\"child_resource\": \"sections\""))
        .stdout(contains("\"strict\": false"));
}
