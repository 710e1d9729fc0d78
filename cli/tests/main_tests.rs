//! # targz CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Top-level behaviour of the `targz` binary: standard flags, argument
//! validation and the exit status on errors.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_version_flag() {
    targz_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag_lists_options() {
    targz_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--threshold"))
        .stdout(predicate::str::contains("--exclude"))
        .stdout(predicate::str::contains("--list-backends"));
}

/// Without paths the command is a usage error (clap exits with status 2).
#[test]
fn test_paths_are_required() {
    let dir = tempdir().unwrap();
    targz_in(dir.path()).assert().failure();
}

#[test]
fn test_missing_input_exits_with_one() {
    let dir = tempdir().unwrap();
    targz_in(dir.path())
        .arg("does-not-exist")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("does-not-exist"));
    assert!(!dir.path().join("does-not-exist.tar").exists());
}

#[test]
fn test_zero_threshold_is_rejected() {
    let dir = tempdir().unwrap();
    make_sample_tree(dir.path(), "docs");
    targz_in(dir.path())
        .args(["--threshold", "0", "docs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_invalid_project_config_is_reported() {
    let dir = tempdir().unwrap();
    make_sample_tree(dir.path(), "docs");
    std::fs::write(dir.path().join(".targz.toml"), "[archive]\nunknown = 1\n").unwrap();
    targz_in(dir.path())
        .arg("docs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".targz.toml"));
}
