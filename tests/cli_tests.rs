//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("src2html"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("src2html"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("src2html"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("HTML"))
        .stdout(predicate::str::contains("--not-match-f"))
        .stdout(predicate::str::contains("--exclude-ext"))
        .stdout(predicate::str::contains("--open"));
}

#[test]
fn test_source_is_required() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("src2html"));
    cmd.assert().failure().stderr(predicate::str::contains("SOURCE"));
}

#[test]
fn test_missing_source_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("does-not-exist");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("src2html"));
    cmd.arg(&missing);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("No source files found").not());
}

#[test]
fn test_directory_without_sources_is_empty_result() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G']).expect("write");
    fs::create_dir_all(dir.path().join("node_modules")).expect("mkdir");
    fs::write(dir.path().join("node_modules").join("index.js"), "x").expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("src2html"));
    cmd.arg(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No source files found"))
        .stderr(predicate::str::contains("not found").not());
    assert!(!dir.path().join("bundle.html").exists());
}

#[test]
fn test_explicit_missing_config_fails() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("a.rs"), "fn a() {}\n").expect("write");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("src2html"));
    cmd.arg(dir.path()).args(["--config", "missing.toml"]);
    cmd.assert().failure().stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_unreadable_single_file_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("main.go");
    fs::write(&source, b"package main\0\0").expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("src2html"));
    cmd.arg(&source);
    cmd.assert()
        .failure()
        .code(predicate::ne(0))
        .stderr(predicate::str::contains("Cannot convert"));
    assert!(!dir.path().join("main.html").exists());
}
