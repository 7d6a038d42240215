//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::fs;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "homeward-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

const SAMPLE_TRACE: &str = r#"{
    "version": "1.0",
    "environment": {
        "secondary_owner": "com.android.launcher",
        "default_home": { "package": "org.acme.launcher", "component": ".Home" }
    },
    "signals": [
        {
            "signal": "gesture_ended",
            "token": 42,
            "velocity": -5.0,
            "x": 1.0,
            "y": -20.0,
            "predicted": { "without_fling": "home", "with_fling": "recents" }
        },
        { "signal": "recents_start", "token": 42 },
        { "signal": "settled", "token": 42, "outcome": "home" }
    ]
}"#;

#[test]
fn test_gate_accepts_upward_swipe() {
    let (stdout, _, code) = run_cli(&["gate", "--x", "1", "--y", "-20"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("home swipe: yes"));
}

#[test]
fn test_gate_rejects_sideways_swipe() {
    let (stdout, _, code) = run_cli(&["gate", "--x", "15", "--y", "-10"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("home swipe: no"));
}

#[test]
fn test_replay_reports_suppression_and_launch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.json");
    fs::write(&path, SAMPLE_TRACE).unwrap();

    let (stdout, _, code) = run_cli(&["replay", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("-> suppress"));
    assert!(stdout.contains("launched: org.acme.launcher/.Home"));
}

#[test]
fn test_replay_json_output_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.json");
    fs::write(&path, SAMPLE_TRACE).unwrap();

    let (stdout, _, code) = run_cli(&["replay", path.to_str().unwrap(), "--json"]);
    assert_eq!(code, 0);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["steps"][1]["decision"], "suppress");
    assert_eq!(report["launches"].as_array().unwrap().len(), 1);
}

#[test]
fn test_replay_rejects_bad_trace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    let (_, stderr, code) = run_cli(&["replay", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}
