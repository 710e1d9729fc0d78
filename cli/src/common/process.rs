//! # targz Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrappers around `std::process::Command` for running the external
//! compression programs. Execution is synchronous: the caller blocks until the
//! child exits.
//!
//! - **`run_streamed`**: Runs a command with stdout/stderr inherited from targz
//!   (so `gzip -v` progress reaches the terminal) and stdin closed, returning
//!   the exit status.
//! - **`describe_command`**: Renders a program and its arguments for log messages.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::ffi::OsStr;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Runs `program` with `args`, inheriting stdout/stderr, and waits for it to exit.
///
/// A non-zero exit status is *not* an error at this level; callers decide
/// what an unsuccessful status means.
///
/// # Errors
///
/// Returns an `Err` if the process cannot be spawned (e.g. not found,
/// permission denied). The underlying `std::io::Error` is kept as the source.
pub fn run_streamed<I, S>(program: &str, args: I) -> Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    let rendered = describe_command(program, &args);
    debug!("Running: {}", rendered);

    let status = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .status()
        .with_context(|| format!("Failed to execute '{}'", rendered))?;

    debug!("'{}' exited with status: {}", rendered, status);
    Ok(status)
}

/// Renders `program` and `args` as a single space-separated string.
pub fn describe_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}
