//! Integration tests for the habla CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn habla(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("habla").unwrap();
    // isolate from any user or repository configuration
    cmd.env("HOME", home.path())
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    cmd
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    habla(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("check-ignore"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    habla(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("habla"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    habla(&home)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_scan_prints_total_and_fragments() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("a.txt"), "hello").unwrap();
    fs::write(project.path().join("b.bin"), [0x89, b'P', b'N', b'G', 0x00, 0x00]).unwrap();
    fs::write(project.path().join(".gitignore"), "b.bin\n").unwrap();

    habla(&home)
        .arg("scan")
        .arg("--path")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Total number of characters in the repository: 5\n",
        ))
        .stdout(predicate::str::contains(
            "\n\n--- Contents of file a.txt ---\n```\nhello\n```\n--- End of file a.txt ---\n\n",
        ))
        .stdout(predicate::str::contains("b.bin").not());
}

#[test]
fn test_scan_json_output() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("notes.md"), "# notes").unwrap();

    let assert = habla(&home)
        .args(["scan", "--format", "json", "-p"])
        .arg(project.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["total_characters"], 7);
    assert_eq!(report["stats"]["files_included"], 1);
    assert!(report["context"].as_str().unwrap().contains("notes.md"));
}

#[test]
fn test_scan_depth_zero_reads_nothing() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("a.txt"), "hello").unwrap();

    habla(&home)
        .args(["scan", "-d", "0", "-p"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Total number of characters in the repository: 0\n",
        ));
}

#[test]
fn test_scan_missing_root_fails() {
    let home = TempDir::new().unwrap();
    habla(&home)
        .args(["scan", "-p", "does/not/exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan root not found"));
}

#[test]
fn test_scan_budget_warning_and_enforcement() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("big.txt"), "x".repeat(50)).unwrap();

    habla(&home)
        .args(["scan", "--max-characters", "10", "-p"])
        .arg(project.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("too big"));

    habla(&home)
        .args(["scan", "--max-characters", "10", "--enforce-budget", "-p"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too big"));
}

#[test]
fn test_repository_config_is_honoured() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("a.txt"), "hello").unwrap();
    fs::write(home.path().join("habla.toml"), "[scanner]\nmax_depth = 0\n").unwrap();

    habla(&home)
        .args(["scan", "-p"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Total number of characters in the repository: 0\n",
        ));
}

#[test]
fn test_check_ignore_reports_rule() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(".gitignore"), "*.log\n").unwrap();
    fs::write(project.path().join("app.log"), "log").unwrap();

    habla(&home)
        .arg("check-ignore")
        .arg("--root")
        .arg(project.path())
        .arg(project.path().join("app.log"))
        .arg(project.path().join("main.rs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("app.log\texcluded by "))
        .stdout(predicate::str::contains(".gitignore:1: *.log"))
        .stdout(predicate::str::contains("main.rs\tincluded"));
}

#[test]
fn test_config_show() {
    let home = TempDir::new().unwrap();
    habla(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_depth = 10"))
        .stdout(predicate::str::contains("max_characters = 80000"));
}
