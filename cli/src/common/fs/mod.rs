//! # targz Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Filesystem helpers shared by the archive pipeline. Everything currently
//! lives in the `io` submodule (`file_size`, `remove_file_if_exists`,
//! `ensure_dir_exists`); import from it directly, e.g.
//! `use crate::common::fs::io::file_size;`.
//!

/// Basic file I/O primitives reporting failures as `TargzError::Io`.
pub mod io;
