use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_script_prints_every_section() {
    cargo_bin_cmd!("keepsake")
        .arg("script")
        .assert()
        .success()
        .stdout(predicate::str::contains("[welcome]"))
        .stdout(predicate::str::contains("[heart]"))
        .stdout(predicate::str::contains("[letter]"));
}

#[test]
fn test_printed_script_loads_back() {
    let dir = tempdir().unwrap();
    let output = cargo_bin_cmd!("keepsake")
        .arg("script")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let script = dir.path().join("script.toml");
    fs::write(&script, output).unwrap();

    cargo_bin_cmd!("keepsake")
        .env("KEEPSAKE_HOME", dir.path())
        .args(["rehearse", "--speed", "20", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("finished"));
}
