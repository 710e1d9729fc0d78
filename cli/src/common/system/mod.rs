//! # targz System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Host inspection helpers. At the moment this is the tool availability probe
//! used by the compression backends to decide whether `zopfli`, `pigz` or
//! `gzip` can be invoked on this machine.
//!
//! The probe tries to run `<program> --version` with all stdio discarded. If
//! the OS reports the program as not found, it is unavailable. Any process
//! that actually starts counts as available, whatever its exit status
//! (`zopfli` exits non-zero on an unknown flag but is clearly installed).
//!
use crate::core::error::Result;
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use tracing::{debug, error};

/// Returns `Ok(true)` if `program` can be started on this host.
///
/// # Errors
///
/// Returns an `Err` if spawning fails for a reason other than "not found",
/// such as a permission error on the executable.
pub fn tool_available(program: &str) -> Result<bool> {
    let mut command = Command::new(program);
    command
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    debug!("Probing for '{}'", program);
    match command.status() {
        Ok(status) => {
            debug!("Probe of '{}' exited with status: {}", program, status);
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("'{}' not found (ErrorKind::NotFound).", program);
            Ok(false)
        }
        Err(e) => {
            error!("Error probing for '{}': {}", program, e);
            Err(anyhow::Error::new(e)
                .context(format!("Failed to probe for '{}'", program)))
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_available_missing() {
        assert!(!tool_available("nonexistentcommand12345").unwrap_or(true));
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_available_present() {
        // `sh` is present on every unix test runner.
        assert!(tool_available("sh").unwrap_or(false));
    }
}
