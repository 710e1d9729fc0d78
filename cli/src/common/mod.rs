//! # targz Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Root of the shared utility modules. Command handlers (`commands::`) and core
//! infrastructure (`core::`) stay small by delegating to these:
//!
//! - **`archive`**: The archive pipeline: tar building, backend registry and
//!   selection, compression, verification.
//! - **`fs`**: Filesystem primitives (`file_size`, `remove_file_if_exists`,
//!   `ensure_dir_exists`).
//! - **`process`**: Running external programs and collecting their exit status.
//! - **`system`**: Probing whether a tool is installed.
//! - **`ui`**: Formatting of the lines printed to stdout.
//!
//! ```rust
//! use crate::common::{archive, fs, ui};
//!
//! let size = fs::io::file_size(Path::new("site.tar"))?;
//! println!("{}", ui::compressing_message(size, "pigz"));
//! ```
//!

/// The archive pipeline and its stages.
pub mod archive;
/// Filesystem primitives reporting `TargzError::Io`.
pub mod fs;
/// External process execution.
pub mod process;
/// Host inspection (tool availability).
pub mod system;
/// Terminal output formatting.
pub mod ui;
