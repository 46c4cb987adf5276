// ABOUTME: Integration tests for the ananeo CLI commands.
// ABOUTME: Validates --help output and init command behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn ananeo_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ananeo"))
}

#[test]
fn help_shows_commands() {
    ananeo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("activate"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("ananeo.yml");

    ananeo_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "ananeo.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(
        content.contains("registry_prefix:"),
        "Config should have registry_prefix field"
    );
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("ananeo.yml");

    fs::write(&config_path, "existing: config").unwrap();

    ananeo_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_seeds_registry_prefix() {
    let temp_dir = tempfile::tempdir().unwrap();

    ananeo_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--registry-prefix", "ghcr.io/acme"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("ananeo.yml")).unwrap();
    assert!(content.contains("registry_prefix: ghcr.io/acme"));
}

#[test]
fn commands_require_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();

    ananeo_cmd()
        .current_dir(temp_dir.path())
        .args(["update", "--version", "1.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
