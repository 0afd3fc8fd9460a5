use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("keepsake")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("rehearse"))
        .stdout(predicate::str::contains("script"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_play_help_shows_flags() {
    cargo_bin_cmd!("keepsake")
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-haptics"))
        .stdout(predicate::str::contains("--speed"))
        .stdout(predicate::str::contains("--script"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("keepsake")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_play_without_terminal_fails() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("keepsake")
        .env("KEEPSAKE_HOME", dir.path())
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
