//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify exit codes and outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "ratekeeper-cli", "--"])
        .args(args)
        .env("RATEKEEPER_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "Help failed");
    assert!(stdout.contains("Ratekeeper CLI"));
}

#[test]
fn test_status() {
    let (stdout, _, code) = run_cli(&["status"]);
    assert_eq!(code, 0, "Status failed");

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("status output is valid JSON");
    assert!(parsed["ledger"].is_object());
    assert!(parsed["evaluation"]["verdicts"].is_array());
}

#[test]
fn test_event_without_prompt() {
    let (stdout, _, code) = run_cli(&["event", "--no-prompt"]);
    assert_eq!(code, 0, "Event failed");
    assert!(stdout.contains("significant events:"));
}

#[test]
fn test_session() {
    let (stdout, _, code) = run_cli(&["session"]);
    assert_eq!(code, 0, "Session failed");
    assert!(stdout.contains("app sessions:"));
}

#[test]
fn test_reset_all() {
    let _ = run_cli(&["event", "--no-prompt"]);
    let (stdout, _, code) = run_cli(&["reset", "all"]);
    assert_eq!(code, 0, "Reset failed");
    assert!(stdout.contains("all trackers cleared"));
}

#[test]
fn test_completions() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("ratekeeper-cli"));
}
