use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn cartwright() -> Command {
    Command::cargo_bin("cartwright").expect("binary should build")
}

#[test]
fn help_lists_subcommands() {
    cartwright()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("check-config"));
}

#[test]
fn check_config_accepts_a_valid_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"[quote]\nttl_minutes = 30\n")
        .expect("write config");

    cartwright()
        .arg("check-config")
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn check_config_rejects_a_broken_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"[quote]\nttl_minutes = -1\n")
        .expect("write config");

    cartwright()
        .arg("check-config")
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn check_config_rejects_a_missing_file() {
    cartwright()
        .arg("check-config")
        .arg("--config")
        .arg("/nonexistent/cartwright.toml")
        .assert()
        .failure();
}
