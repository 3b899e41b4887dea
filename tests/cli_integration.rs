//! Integration tests for the leadfinder binary.
//!
//! Network-shaped tests point at a closed local port so every query
//! degrades to a transport failure quickly; the pipeline's contract is
//! that such runs still succeed with an empty email list.

use assert_cmd::Command;
use predicates::prelude::*;

/// Endpoint that refuses connections immediately (discard port).
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

fn leadfinder() -> Command {
    Command::cargo_bin("leadfinder").expect("binary builds")
}

#[test]
fn test_help_shows_usage() {
    leadfinder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--searx-url"))
        .stdout(predicate::str::contains("--contact-name"));
}

#[test]
fn test_missing_endpoint_is_a_usage_error() {
    leadfinder()
        .arg("acme.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--searx-url"));
}

#[test]
fn test_invalid_endpoint_reports_config_error_and_exits_nonzero() {
    leadfinder()
        .args(["Acme Corp", "-s", "ftp://bad-endpoint", "-q"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn test_unreachable_backend_degrades_to_no_emails() {
    leadfinder()
        .args(["Acme Corp", "-s", DEAD_ENDPOINT, "-f", "txt", "-q", "-t", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# No emails found"));
}

#[test]
fn test_json_output_contains_record_fields() {
    leadfinder()
        .args(["Acme Corp", "-s", DEAD_ENDPOINT, "-q", "-t", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"search_name\": \"Acme Corp\""))
        .stdout(predicate::str::contains("\"target_domain\": null"))
        .stdout(predicate::str::contains("\"found_emails\": []"));
}

#[test]
fn test_output_file_is_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("nested").join("emails.txt");

    leadfinder()
        .args(["Acme Corp", "-s", DEAD_ENDPOINT, "-f", "txt", "-q", "-t", "1"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("output file written");
    assert_eq!(content, "# No emails found");
}
