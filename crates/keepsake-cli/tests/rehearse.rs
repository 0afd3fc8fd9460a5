use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_rehearse_prints_the_whole_timeline() {
    let dir = tempdir().unwrap();

    let output = cargo_bin_cmd!("keepsake")
        .env("KEEPSAKE_HOME", dir.path())
        .args(["rehearse", "--speed", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("advance  welcome -> consent"))
        .stdout(predicate::str::contains("advance  assurance -> letter"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.trim_end().ends_with("finished"));
}

#[test]
fn test_rehearse_uses_script_override() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("script.toml");
    fs::write(
        &script,
        "[letter]\nheading = \"For you\"\nparagraphs = [\"Short and sweet.\"]\n",
    )
    .unwrap();

    cargo_bin_cmd!("keepsake")
        .env("KEEPSAKE_HOME", dir.path())
        .args(["rehearse", "--speed", "20", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("reveal   letter: Short and sweet."));
}

#[test]
fn test_rehearse_rejects_bad_speed() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("keepsake")
        .env("KEEPSAKE_HOME", dir.path())
        .args(["rehearse", "--speed", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--speed must be a positive number"));
}

#[test]
fn test_rehearse_reports_invalid_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "haptics = \"loud\"\n").unwrap();

    cargo_bin_cmd!("keepsake")
        .env("KEEPSAKE_HOME", dir.path())
        .arg("rehearse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}
