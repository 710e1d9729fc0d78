//! # targz Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout targz. Every stage of
//! the archive pipeline raises one of the `TargzError` variants so the kind of
//! failure survives propagation through `anyhow`, while `anyhow::Context`
//! layers on the human-readable "what were we doing" messages.
//!
//! ## Architecture
//!
//! - `TargzError`: A `thiserror` enum covering the failure kinds of the pipeline
//!   (I/O, unavailable backend, failed backend run) plus configuration errors.
//! - `Result<T>`: A type alias for `anyhow::Result<T>`.
//!
//! ## Examples
//!
//! ```rust
//! // Raise a typed error
//! return Err(TargzError::BackendUnavailable { backend: "gzip".into() })?;
//!
//! // Recover the kind further up
//! match pipeline.run(&request) {
//!     Err(e) if matches!(
//!         e.downcast_ref::<TargzError>(),
//!         Some(TargzError::BackendExecution { .. })
//!     ) => println!("the intermediate .tar was kept for inspection"),
//!     other => other?,
//! }
//! ```
//!
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error type for the targz application.
#[derive(Error, Debug)]
pub enum TargzError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// An input could not be read, or the archive could not be written or measured.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No backend can be invoked, not even the fallback.
    #[error("Compression backend `{backend}` is not available on this system.")]
    BackendUnavailable { backend: String },

    /// The backend process ran but exited unsuccessfully.
    #[error("Compression backend `{backend}` failed ({}).", describe_exit(.code))]
    BackendExecution { backend: String, code: Option<i32> },
}

impl TargzError {
    /// Wraps an `std::io::Error` together with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TargzError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = TargzError::Config("threshold must be positive".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: threshold must be positive"
        );

        let unavailable = TargzError::BackendUnavailable {
            backend: "gzip".into(),
        };
        assert_eq!(
            unavailable.to_string(),
            "Compression backend `gzip` is not available on this system."
        );

        let failed = TargzError::BackendExecution {
            backend: "pigz".into(),
            code: Some(2),
        };
        assert_eq!(
            failed.to_string(),
            "Compression backend `pigz` failed (exit code 2)."
        );

        let killed = TargzError::BackendExecution {
            backend: "zopfli".into(),
            code: None,
        };
        assert!(killed.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_io_error_keeps_kind_and_path() {
        let err = TargzError::io(
            "missing/file.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing/file.txt"));
        match err {
            TargzError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = anyhow::Error::new(TargzError::BackendUnavailable {
            backend: "gzip".into(),
        })
        .context("Failed to select a compression backend");
        assert!(matches!(
            err.downcast_ref::<TargzError>(),
            Some(TargzError::BackendUnavailable { .. })
        ));
    }
}
