//! CLI integration tests
//!
//! These tests run the built binary and check exit codes and output.

#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn rulekit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rulekit"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

// ============================================================================
// Card Command Tests
// ============================================================================

#[test]
fn test_cli_card_valid() {
    let output = rulekit(&["card", "4111111111111111", "--provider", "visa"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "valid card should succeed");
    assert!(stdout.contains("Card is valid"));
}

#[test]
fn test_cli_card_bad_checksum() {
    let output = rulekit(&["card", "4111111111111112"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Invalid card number"));
}

#[test]
fn test_cli_card_wrong_provider() {
    let output = rulekit(&["card", "4111111111111111", "--provider", "amex"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("AmericanExpress"));
}

#[test]
fn test_cli_card_unknown_provider() {
    let output = rulekit(&["card", "4111111111111111", "--provider", "bankcard"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_card_json_output() {
    let output = rulekit(&["card", "4111111111111112", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["number"], "Invalid card number");
}

#[test]
fn test_cli_card_expired() {
    let output = rulekit(&["card", "4111111111111111", "--expiration", "01/20"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Invalid expiration date"));
}

// ============================================================================
// Expiration Command Tests
// ============================================================================

#[test]
fn test_cli_expiration() {
    assert!(rulekit(&["expiration", "12/99"]).status.success());
    assert_eq!(rulekit(&["expiration", "13/99"]).status.code(), Some(1));
    assert_eq!(rulekit(&["expiration", "01/20"]).status.code(), Some(1));
}

// ============================================================================
// String Command Tests
// ============================================================================

#[test]
fn test_cli_string_valid() {
    let output = rulekit(&["string", "Secret123", "--min-length", "6", "--require-number"]);
    assert!(output.status.success());
}

#[test]
fn test_cli_string_invalid() {
    let output = rulekit(&["string", "abc", "--min-length", "6", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(
        json,
        serde_json::json!(["the value does not meet the minimum length"])
    );
}

#[test]
fn test_cli_string_conflicting_options() {
    let output = rulekit(&["string", "abc", "--min-length", "6", "--max-length", "3"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Error"));
}

#[test]
fn test_cli_help() {
    let output = rulekit(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("card"));
    assert!(stdout.contains("string"));
}
