//! # targz CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and drives the compiled `targz` binary through
//! `assert_cmd`.
//!
//! Tests that need a real compressor pin the backends through a project
//! `.targz.toml` written into the temporary working directory, so the outcome
//! does not depend on whether `zopfli` or `pigz` happen to be installed.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// A program name that will not exist on any test host.
pub const MISSING_PROGRAM: &str = "targz-test-no-such-compressor";

/// Creates an `assert_cmd::Command` for the `targz` binary built for this test run.
///
/// ## Panics
/// Panics if the `targz` binary cannot be found via `Command::cargo_bin`.
pub fn targz_cmd() -> Command {
    Command::cargo_bin("targz").expect("Failed to find targz binary for testing")
}

/// Same as `targz_cmd`, running inside `dir` with `RUST_LOG` cleared.
pub fn targz_in(dir: &Path) -> Command {
    let mut cmd = targz_cmd();
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("TARGZ_THRESHOLD");
    cmd
}

/// Writes a `.targz.toml` into `dir` selecting the given backend programs.
pub fn write_backends_config(dir: &Path, high_ratio: &str, parallel: &str, fallback: &str) {
    let content = format!(
        "[backends]\nhigh_ratio = \"{}\"\nparallel = \"{}\"\nfallback = \"{}\"\n",
        high_ratio, parallel, fallback
    );
    fs::write(dir.join(".targz.toml"), content).expect("Failed to write .targz.toml");
}

/// Creates `dir/<name>/` with a couple of compressible text files.
pub fn make_sample_tree(dir: &Path, name: &str) {
    let root = dir.join(name);
    fs::create_dir_all(root.join("chapters")).expect("Failed to create sample tree");
    fs::write(root.join("README.md"), "# Sample\n".repeat(200)).unwrap();
    fs::write(
        root.join("chapters/one.txt"),
        "It was a bright cold day in April.\n".repeat(500),
    )
    .unwrap();
    fs::write(root.join(".DS_Store"), "finder junk").unwrap();
}

/// Whether `gzip` can be run on this host.
pub fn gzip_installed() -> bool {
    std::process::Command::new("gzip")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}
