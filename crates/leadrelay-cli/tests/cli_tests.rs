//! Integration tests for the `leadrelay` CLI binary.
//!
//! These run the CLI as a subprocess and check exit codes and output.
//! Submissions go to an `httpmock` relay or to a closed local port.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::Command;

use httpmock::prelude::*;
use serde_json::json;

const UNREACHABLE_RELAY: &str = "http://127.0.0.1:19999";

fn leadrelay_bin() -> String {
    let path = env!("CARGO_BIN_EXE_leadrelay");
    assert!(
        Path::new(path).exists(),
        "leadrelay binary not found at {path}"
    );
    path.to_owned()
}

/// Run leadrelay with args and return (`exit_code`, stdout, stderr).
fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(leadrelay_bin())
        .args(args)
        .env("LEADRELAY_RELAY_URL", UNREACHABLE_RELAY)
        .env_remove("LEADRELAY_PUBLIC_ACCESS_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute leadrelay");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

const JOHN: [&str; 6] = [
    "--name",
    "John Smith",
    "--email",
    "john@example.com",
    "--phone",
    "7135550123",
];

fn with_john<'a>(head: &[&'a str], tail: &[&'a str]) -> Vec<&'a str> {
    let mut args = head.to_vec();
    args.extend_from_slice(&JOHN);
    args.extend_from_slice(tail);
    args
}

// ── Version & help ───────────────────────────────────────────────────

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("leadrelay CLI"), "help: {stdout}");
    for cmd in ["submit", "preview", "options"] {
        assert!(stdout.contains(cmd), "help should list '{cmd}': {stdout}");
    }
}

#[test]
fn test_unknown_command_fails() {
    let (code, _, stderr) = run(&["nonexistent-command"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"), "stderr: {stderr}");
}

// ── options ──────────────────────────────────────────────────────────

#[test]
fn test_options_lists_slugs_and_labels() {
    let (code, stdout, _) = run(&["options"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("storm-damage"), "stdout: {stdout}");
    assert!(stdout.contains("single-family"), "stdout: {stdout}");
    assert!(stdout.contains("Project types"));
    assert!(stdout.contains("Property types"));
}

// ── preview ──────────────────────────────────────────────────────────

#[test]
fn test_preview_shows_subject_and_fallbacks() {
    let (code, stdout, _) = run(&with_john(&["preview"], &[]));
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("New Property Evaluation Request from John Smith"));
    assert!(stdout.contains("Zena Construction Website"));
    assert!(stdout.contains("Not provided"));
    assert!(stdout.contains("Not specified"));
    assert!(stdout.contains("No additional details provided"));
}

#[test]
fn test_preview_uses_property_description_as_details() {
    let (code, stdout, _) = run(&with_john(
        &["preview"],
        &["--property-type", "condo", "--property-description", "Two-story brick"],
    ));
    assert_eq!(code, 0);
    assert!(stdout.contains("condo"));
    assert!(stdout.contains("Two-story brick"));
}

#[test]
fn test_preview_labels_known_option_slugs() {
    let (code, stdout, _) = run(&with_john(&["preview"], &["--project-type", "storm-damage"]));
    assert_eq!(code, 0);
    assert!(stdout.contains("Storm Damage Repair"), "stdout: {stdout}");

    let (code, stdout, _) = run(&with_john(&["preview"], &["--property-type", "single-family"]));
    assert_eq!(code, 0);
    assert!(stdout.contains("Single Family Home"), "stdout: {stdout}");

    let (_, stdout, _) = run(&with_john(&["preview"], &["--project-type", "gutters"]));
    assert!(!stdout.contains("Option"), "stdout: {stdout}");
}

#[test]
fn test_preview_rejects_missing_fields() {
    let (code, stdout, _) = run(&["preview", "--name", "John"]);
    assert_ne!(code, 0);
    assert!(stdout.contains("Email is required"), "stdout: {stdout}");
    assert!(stdout.contains("Phone is required"), "stdout: {stdout}");
}

// ── submit ───────────────────────────────────────────────────────────

#[test]
fn test_submit_invalid_email_never_calls_relay() {
    let server = MockServer::start();
    let relay = server.mock(|when, then| {
        when.method(POST).path("/api/contact");
        then.status(200).json_body(json!({ "success": true }));
    });

    let (code, stdout, _) = run(&[
        "submit",
        "--relay",
        &server.base_url(),
        "--name",
        "John Smith",
        "--email",
        "not-an-email",
        "--phone",
        "7135550123",
    ]);

    assert_ne!(code, 0);
    assert!(stdout.contains("Invalid email address"), "stdout: {stdout}");
    relay.assert_hits(0);
}

#[test]
fn test_submit_through_relay_shows_confirmation() {
    let server = MockServer::start();
    let relay = server.mock(|when, then| {
        when.method(POST)
            .path("/api/contact")
            .json_body_partial(r#"{"name":"John Smith","email":"john@example.com"}"#);
        then.status(200).json_body(json!({ "success": true }));
    });

    let base = server.base_url();
    let (code, stdout, stderr) = run(&with_john(&["submit", "--relay", &base], &[]));

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("Thank You!"), "stdout: {stdout}");
    assert!(stdout.contains("24 hours"));
    relay.assert();
}

#[test]
fn test_submit_evaluation_page_copy() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/contact");
        then.status(200).json_body(json!({ "success": true }));
    });

    let base = server.base_url();
    let (code, stdout, _) = run(&with_john(
        &["submit", "--page", "evaluation", "--relay", &base],
        &[],
    ));

    assert_eq!(code, 0);
    assert!(stdout.contains("Request Received!"), "stdout: {stdout}");
}

#[test]
fn test_submit_relay_failure_shows_generic_error_only() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/contact");
        then.status(500)
            .json_body(json!({ "error": "Failed to send email" }));
    });

    let base = server.base_url();
    let (code, stdout, _) = run(&with_john(&["submit", "--relay", &base], &[]));

    assert_ne!(code, 0);
    assert!(
        stdout.contains("There was an error submitting your request. Please try again."),
        "stdout: {stdout}"
    );
    assert!(!stdout.contains("Failed to send email"));
}

#[test]
fn test_submit_unreachable_relay_shows_generic_error() {
    let (code, stdout, _) = run(&with_john(&["submit"], &[]));
    assert_ne!(code, 0);
    assert!(
        stdout.contains("There was an error submitting your request."),
        "stdout: {stdout}"
    );
}

#[test]
fn test_submit_unknown_page_fails() {
    let (code, _, stderr) = run(&with_john(&["submit", "--page", "pricing"], &[]));
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown page"), "stderr: {stderr}");
}

// ── submit --direct ──────────────────────────────────────────────────

#[test]
fn test_direct_requires_public_key() {
    let (code, _, stderr) = run(&with_john(&["submit", "--direct"], &[]));
    assert_ne!(code, 0);
    assert!(stderr.contains("--public-key"), "stderr: {stderr}");
}

#[test]
fn test_direct_posts_public_key_to_provider() {
    let server = MockServer::start();
    let provider = server.mock(|when, then| {
        when.method(POST)
            .path("/submit")
            .json_body_partial(
                r#"{"access_key":"pub-123","subject":"New Property Evaluation Request from John Smith"}"#,
            );
        then.status(200)
            .json_body(json!({ "success": true, "message": "Email sent successfully!" }));
    });

    let base = server.base_url();
    let (code, stdout, stderr) = run(&with_john(
        &["submit", "--direct", "--public-key", "pub-123", "--provider-url", &base],
        &[],
    ));

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("24 hours"));
    assert!(stderr.contains("public access key"));
    provider.assert();
}
