//! Integration tests for export, import and reset.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_export_to_stdout_is_pretty_plan_json() {
    let env = TestEnv::new();
    let output = env.pb().arg("export").assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("{\n  \""));

    let plan = common::parse_json(text.as_bytes());
    assert_eq!(plan["config"]["brandName"], "Your Company");
    assert_eq!(plan["phases"].as_array().unwrap().len(), 2);
    assert!(plan["techStack"]["frontend"].is_array());
}

#[test]
fn test_export_to_default_file() {
    let env = TestEnv::new();
    let result = env.json(&["export", "-o"]);
    assert!(result["bytes"].as_u64().unwrap() > 0);

    let file = env.path().join("plan.json");
    assert!(file.exists());
    let plan: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap();
    assert_eq!(plan["config"]["title"], "Website Migration Plan");
}

#[test]
fn test_export_to_named_file() {
    let env = TestEnv::new();
    let file = env.path().join("backup.json");
    env.pb()
        .args(["-H", "export", "--output", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported plan to"));
    assert!(file.exists());
}

#[test]
fn test_import_replaces_plan() {
    let env = TestEnv::new();
    let file = env.path().join("plan.json");
    std::fs::write(
        &file,
        r#"{
            "config": {"title": "Imported", "colors": {}},
            "phases": [{"id": 5, "title": "Only", "weeks": "1", "tasks": [{"id": "5-1", "task": "One"}]}],
            "sections": [],
            "techStack": {},
            "risks": [{"risk": "Scope", "impact": "Severe"}]
        }"#,
    )
    .unwrap();

    let result = env.json(&["import", file.to_str().unwrap()]);
    assert_eq!(result["imported"], true);
    assert_eq!(result["phases"], 1);
    assert_eq!(result["total_tasks"], 1);

    let stats = env.json(&["show"]);
    assert_eq!(stats["title"], "Imported");
    assert_eq!(stats["timeline"], "1 Weeks");

    // Unknown impacts fall back to Medium.
    assert_eq!(env.json(&["risk", "list"])["items"][0]["impact"], "Medium");
    assert_eq!(env.json(&["phase", "add"])["item"]["id"], 6);
}

#[test]
fn test_import_keeps_progress_and_comments() {
    let env = TestEnv::new();
    env.json(&["task", "toggle", "1-1"]);
    env.json(&["comment", "add", "phase-1", "Keep me", "--author", "Ana"]);

    let file = env.path().join("plan.json");
    env.json(&["export", "-o", file.to_str().unwrap()]);
    env.json(&["import", file.to_str().unwrap()]);

    assert_eq!(env.json(&["progress"])["completed_tasks"], 1);
    assert_eq!(env.json(&["comment", "list"])["count"], 1);
}

#[test]
fn test_import_keeps_unknown_nested_keys() {
    let env = TestEnv::new();
    let file = env.path().join("plan.json");
    std::fs::write(
        &file,
        r#"{
            "config": {"title": "Imported", "colors": {}, "logo": "logo.svg"},
            "phases": [{"id": 1, "title": "Only", "weeks": "1-2", "owner": "Ana",
                        "tasks": [{"id": "1-1", "task": "One", "estimate": 3}]}],
            "sections": [{"name": "Hero", "layout": "hero", "fields": [], "order": 2}],
            "techStack": {"cms": [{"name": "Headless", "vendor": "Acme"}]},
            "risks": [{"risk": "Scope", "impact": "High", "owner": "Bo"}]
        }"#,
    )
    .unwrap();
    env.json(&["import", file.to_str().unwrap()]);
    env.json(&["phase", "set", "0", "title", "Renamed"]);

    let output = env.pb().arg("export").assert().success().get_output().stdout.clone();
    let plan = common::parse_json(&output);
    assert_eq!(plan["config"]["logo"], "logo.svg");
    assert_eq!(plan["phases"][0]["title"], "Renamed");
    assert_eq!(plan["phases"][0]["owner"], "Ana");
    assert_eq!(plan["phases"][0]["tasks"][0]["estimate"], 3);
    assert_eq!(plan["sections"][0]["order"], 2);
    assert_eq!(plan["techStack"]["cms"][0]["vendor"], "Acme");
    assert_eq!(plan["risks"][0]["owner"], "Bo");
}

#[test]
fn test_import_invalid_json_leaves_plan_unchanged() {
    let env = TestEnv::new();
    env.json(&["meta", "set", "title", "Before"]);

    let file = env.path().join("broken.json");
    std::fs::write(&file, "{ not json").unwrap();
    env.pb()
        .args(["import", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid import"));

    assert_eq!(env.json(&["show"])["title"], "Before");
}

#[test]
fn test_import_missing_file() {
    TestEnv::new()
        .pb()
        .args(["import", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_reset_requires_confirmation() {
    let env = TestEnv::new();
    env.json(&["phase", "add"]);
    env.pb()
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(env.json(&["show"])["phases"], 3);
}

#[test]
fn test_reset_restores_defaults() {
    let env = TestEnv::new();
    env.json(&["phase", "add"]);
    env.json(&["task", "toggle", "1-1"]);
    env.json(&["comment", "add", "phase-1", "Gone soon", "--author", "Ana"]);

    let result = env.json(&["reset", "--yes"]);
    assert_eq!(result["reset"], true);
    assert_eq!(result["phases"], 2);

    let stats = env.json(&["show"]);
    assert_eq!(stats["phases"], 2);
    assert_eq!(stats["completed_tasks"], 0);
    assert_eq!(env.json(&["comment", "list"])["count"], 0);

    // The remembered author survives a reset.
    let added = env.json(&["comment", "add", "overview-summary", "Back again"]);
    assert_eq!(added["item"]["author"], "Ana");
}
