// ABOUTME: Integration tests for the repull CLI.
// ABOUTME: Covers --help output and failures reported before any upgrade runs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn repull_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repull"));
    cmd.env_remove("REPULL_SOCKET").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_shows_upgrade_command() {
    repull_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upgrade"));
}

#[test]
fn upgrade_help_lists_selection_flags() {
    repull_cmd()
        .args(["upgrade", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--container"))
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--pullonly"));
}

#[test]
fn container_and_all_together_is_rejected() {
    repull_cmd()
        .args(["upgrade", "--container", "web", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not both"));
}

#[test]
fn missing_selection_is_rejected() {
    repull_cmd()
        .arg("upgrade")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no container selected"));
}

#[test]
fn empty_container_with_all_passes_selection() {
    let temp_dir = tempfile::tempdir().unwrap();

    repull_cmd()
        .current_dir(temp_dir.path())
        .env("DOCKER_HOST", "tcp://127.0.0.1:2375")
        .args(["upgrade", "--container=", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime detection failed"))
        .stderr(predicate::str::contains("not both").not());
}

#[test]
fn unusual_container_name_passes_selection() {
    let temp_dir = tempfile::tempdir().unwrap();

    repull_cmd()
        .current_dir(temp_dir.path())
        .env("DOCKER_HOST", "tcp://127.0.0.1:2375")
        .args(["upgrade", "--container", "my web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime detection failed"));
}

#[test]
fn selection_error_is_reported_as_json() {
    repull_cmd()
        .args(["--json", "upgrade", "--pullonly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#""event":"error""#));
}

#[test]
fn quiet_and_json_conflict() {
    repull_cmd()
        .args(["--quiet", "--json", "upgrade", "--all"])
        .assert()
        .failure();
}

#[test]
fn missing_config_file_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("nope.yml");

    repull_cmd()
        .arg("--config")
        .arg(&missing)
        .args(["upgrade", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn unknown_config_key_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("repull.yml"), "registry: ghcr.io\n").unwrap();

    repull_cmd()
        .current_dir(temp_dir.path())
        .args(["upgrade", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YAML parse error"));
}

#[test]
fn unsupported_docker_host_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();

    repull_cmd()
        .current_dir(temp_dir.path())
        .env("DOCKER_HOST", "tcp://127.0.0.1:2375")
        .args(["upgrade", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime detection failed"));
}

#[test]
fn unreachable_socket_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let socket = temp_dir.path().join("missing.sock");

    repull_cmd()
        .current_dir(temp_dir.path())
        .arg("--socket")
        .arg(&socket)
        .args(["upgrade", "--all", "--pullonly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime connection failed"));
}

#[test]
fn oversized_stop_timeout_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    repull_cmd()
        .current_dir(temp_dir.path())
        .args(["upgrade", "--all", "--stop-timeout", "3000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stop_timeout cannot exceed"));
}
