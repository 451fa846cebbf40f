//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("questionctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("questionctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("0.0.0.0:8888"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("questionctl").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PostgreSQL connection string"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("questionctl").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}
