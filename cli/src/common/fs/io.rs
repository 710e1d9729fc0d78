//! # targz Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module centralizes the small filesystem primitives the archive
//! pipeline relies on. Each one wraps a `std::fs` call and reports failures as
//! `TargzError::Io`, carrying the path involved, so callers further up can tell
//! an I/O failure apart from a backend failure.
//!
//! ## Architecture
//!
//! - **`file_size`**: The single "size of this file in bytes" primitive. Reads
//!   filesystem metadata instead of shelling out to `stat`, whose flags differ
//!   between GNU and BSD systems.
//! - **`remove_file_if_exists`**: Deletes a file, treating "already gone" as success.
//! - **`ensure_dir_exists`**: Creates a directory (and parents) unless it already exists.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! let size = io::file_size(Path::new("backup.tar"))?;
//! io::remove_file_if_exists(Path::new("backup.tar"))?;
//! ```
//!
use crate::core::error::{Result, TargzError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Returns the size of the file at `path` in bytes.
///
/// # Errors
///
/// Returns `TargzError::Io` if the metadata cannot be read (missing file,
/// permissions).
pub fn file_size(path: &Path) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|e| TargzError::io(path, e))?;
    debug!("Size of {:?}: {} bytes", path, metadata.len());
    Ok(metadata.len())
}

/// Removes the file at `path` if it exists.
///
/// Returns `Ok(true)` if a file was removed and `Ok(false)` if there was
/// nothing to remove.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed file: {:?}", path);
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TargzError::io(path, e).into()),
    }
}

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist it is created along with any missing parents
/// (like `mkdir -p`). If it exists but is not a directory, a
/// `TargzError::Io` with `ErrorKind::AlreadyExists` is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| TargzError::io(path, e))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(TargzError::io(
            path,
            std::io::Error::new(
                ErrorKind::AlreadyExists,
                "path exists but is not a directory"
            )
        ));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}
