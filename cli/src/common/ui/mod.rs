//! # targz Terminal Output (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Formatting for the user-facing lines targz prints to stdout. Sizes are shown
//! in decimal kilobytes (bytes / 1000, truncated), matching what users of the
//! classic `targz` shell function are used to.
//!
//! ```text
//! Compressing .tar (10000 kB) using `zopfli`…
//! project.tar.gz (412 kB) created successfully.
//! ```
//!
use std::path::Path;

/// Converts a byte count to whole decimal kilobytes.
pub fn kilobytes(bytes: u64) -> u64 {
    bytes / 1000
}

/// The progress line printed before a backend is invoked.
pub fn compressing_message(tar_size: u64, backend: &str) -> String {
    format!(
        "Compressing .tar ({} kB) using `{}`…",
        kilobytes(tar_size),
        backend
    )
}

/// The summary line printed once the compressed archive exists.
pub fn created_message(archive: &Path, compressed_size: u64) -> String {
    format!(
        "{} ({} kB) created successfully.",
        archive.display(),
        kilobytes(compressed_size)
    )
}

/// One row of `targz --list-backends`.
pub fn backend_row(role: &str, program: &str, available: bool) -> String {
    let marker = if available { "available" } else { "missing" };
    format!("  {:<11} {:<24} {}", role, program, marker)
}
