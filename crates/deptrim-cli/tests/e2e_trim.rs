//! E2E tests for `deptrim trim` and `deptrim health`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SUMMARY: &str = "Current graph has 14 nodes and 16 edges. If you follow all of this \
                       advice, the new graph will have 8 nodes and 7 edges.";

fn deptrim_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deptrim"));
    cmd.current_dir(dir);
    cmd.env("DEPTRIM_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn edges_json(pairs: &[(&str, &str)]) -> String {
    let edges: Vec<Value> = pairs
        .iter()
        .map(|(from, to)| serde_json::json!({ "from": from, "to": to }))
        .collect();
    serde_json::json!({ "edges": edges }).to_string()
}

/// `:app → :lib`; `:lib` uses the Kotlin stdlib and two Moshi artifacts.
fn write_build(dir: &Path) {
    fs::write(dir.join("app.json"), edges_json(&[(":app", ":lib")])).expect("write app");
    fs::write(
        dir.join("lib.json"),
        edges_json(&[
            (":lib", "kotlin-stdlib-jdk8"),
            (":lib", "moshi-kotlin"),
            (":lib", "moshi-adapters"),
            ("kotlin-stdlib-jdk8", "kotlin-stdlib-jdk7"),
            ("kotlin-stdlib-jdk7", "kotlin-stdlib"),
            ("kotlin-stdlib", "jb:annotations"),
            ("kotlin-stdlib", "kotlin-stdlib-common"),
            ("moshi-kotlin", "kotlin-reflect"),
            ("moshi-kotlin", "kotlin-stdlib"),
            ("moshi-kotlin", "moshi"),
            ("moshi-adapters", "moshi"),
            ("moshi-adapters", "retrofit2"),
            ("moshi", "okio"),
            ("retrofit2", "okhttp"),
            ("okhttp", "okio"),
        ]),
    )
    .expect("write lib");
    fs::write(
        dir.join("deptrim.toml"),
        "[projects]\n\":app\" = \"app.json\"\n\":lib\" = \"lib.json\"\n",
    )
    .expect("write config");
}

const LIB_ADVICE: &str = r#"{
  "projectPath": ":lib",
  "dependencyAdvice": [
    { "dependency": { "identifier": "okio" }, "toConfiguration": "implementation" },
    { "dependency": { "identifier": "moshi-kotlin" }, "fromConfiguration": "implementation" },
    { "dependency": { "identifier": "moshi-adapters" }, "fromConfiguration": "implementation" },
    { "dependency": { "identifier": "kotlin-stdlib-jdk8" }, "fromConfiguration": "implementation", "toConfiguration": "api" }
  ]
}"#;

fn write_advice(dir: &Path) {
    fs::write(
        dir.join("advice.json"),
        format!(r#"[{{ "projectPath": ":app", "dependencyAdvice": [] }}, {LIB_ADVICE}]"#),
    )
    .expect("write advice");
    fs::write(dir.join("lib-advice.json"), LIB_ADVICE).expect("write lib advice");
}

#[test]
fn trim_reports_metrics_and_writes_trimmed_graph() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());
    write_advice(dir.path());

    let output = deptrim_cmd(dir.path())
        .args(["trim", "--advice", "advice.json", "--json"])
        .output()
        .expect("deptrim should not crash");
    assert!(
        output.status.success(),
        "trim failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["advised_projects"], 2);
    assert_eq!(json["metrics"]["original"]["node_count"], 14);
    assert_eq!(json["metrics"]["trimmed"]["edge_count"], 7);
    assert_eq!(json["node_delta"], -6);
    assert_eq!(json["edge_delta"], -9);
    assert_eq!(json["summary"], SUMMARY);

    let trimmed: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("build/deptrim/trimmed-graph.json"))
            .expect("trimmed graph"),
    )
    .expect("trimmed graph is JSON");
    let edges = trimmed["edges"].as_array().expect("edges");
    assert_eq!(edges.len(), 7);
    assert!(
        edges
            .iter()
            .any(|e| e["from"] == ":lib" && e["to"] == "okio")
    );
    assert!(!edges.iter().any(|e| e["to"] == "moshi"));
    assert!(dir.path().join("build/deptrim/trimmed-graph.gv").exists());
}

#[test]
fn trim_text_output_is_the_summary() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());
    write_advice(dir.path());

    deptrim_cmd(dir.path())
        .args(["trim", "--advice", "advice.json", "--format", "text"])
        .assert()
        .success()
        .stdout(format!("{SUMMARY}\n"));
}

#[test]
fn trim_skips_projects_without_graphs() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());
    fs::write(
        dir.path().join("advice.json"),
        r#"[{ "projectPath": ":ghost", "dependencyAdvice": [] }, { "projectPath": ":app" }]"#,
    )
    .expect("write advice");

    deptrim_cmd(dir.path())
        .args(["trim", "--advice", "advice.json", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("new graph will have 2 nodes and 1 edges"));
}

#[test]
fn trim_with_no_resolvable_projects_fails() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());
    fs::write(
        dir.path().join("advice.json"),
        r#"[{ "projectPath": ":ghost" }]"#,
    )
    .expect("write advice");

    let output = deptrim_cmd(dir.path())
        .args(["trim", "--advice", "advice.json", "--json"])
        .output()
        .expect("deptrim should not crash");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"error_code\": \"E2003\""), "stderr: {stderr}");
}

#[test]
fn trim_with_missing_advice_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());

    deptrim_cmd(dir.path())
        .args(["trim", "--advice", "nope.json", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn health_reports_single_project() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());
    write_advice(dir.path());

    let output = deptrim_cmd(dir.path())
        .args(["health", "--graph", "lib.json", "--advice", "lib-advice.json", "--json"])
        .output()
        .expect("deptrim should not crash");
    assert!(
        output.status.success(),
        "health failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["project"], ":lib");
    assert_eq!(json["metrics"]["original"]["node_count"], 13);
    assert_eq!(json["metrics"]["original"]["edge_count"], 15);
    assert_eq!(json["metrics"]["trimmed"]["node_count"], 7);
    assert_eq!(json["metrics"]["trimmed"]["edge_count"], 6);
}

#[test]
fn health_pretty_output_has_heading() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());
    write_advice(dir.path());

    deptrim_cmd(dir.path())
        .args(["health", "--graph", "lib.json", "--advice", "lib-advice.json"])
        .env("FORMAT", "pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project health: :lib"))
        .stdout(predicate::str::contains("Node delta:  -6"));
}

#[test]
fn health_does_not_need_config() {
    let dir = TempDir::new().expect("tempdir");
    write_build(dir.path());
    write_advice(dir.path());
    fs::write(dir.path().join("deptrim.toml"), "[broken").expect("corrupt config");

    deptrim_cmd(dir.path())
        .args(["health", "--graph", "lib.json", "--advice", "lib-advice.json"])
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Current graph has 13 nodes"));
}
