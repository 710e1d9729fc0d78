//! # targz Compression Backends (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines what a compression backend is, the registry that maps
//! each backend role to an implementation, and the compressor stage that runs
//! the selected backend against the intermediate `.tar`.
//!
//! ## Architecture
//!
//! - **`BackendKind`**: The three backend roles, in preference order:
//!   `HighRatio` (`zopfli`), `Parallel` (`pigz`) and `Fallback` (`gzip`).
//! - **`CompressionBackend`**: The capability trait. A backend reports whether it
//!   can run on this host and compresses a file *in place*: `<input>` is
//!   consumed and `<input>.<extension>` is produced.
//! - **`ExternalBackend`**: The production implementation, invoking
//!   `<program> -v <input>` through `common::process`.
//! - **`BackendRegistry`**: Role → boxed backend. Built from configuration in
//!   production and from mock backends in tests, then handed to the pipeline.
//! - **`compress_archive`**: The compressor stage. Prints the progress line,
//!   runs the backend, and guarantees that on success the intermediate archive
//!   is gone and the compressed file exists.
//!
//! ## Usage
//!
//! ```rust
//! let registry = BackendRegistry::from_config(&cfg.backends);
//! let available = registry.available(); // probes each program once
//! let backend = registry.get(BackendKind::Fallback).unwrap();
//! let gz_path = compress_archive(Path::new("site.tar"), tar_size, backend)?;
//! ```
//!
use crate::common::fs::io;
use crate::common::{process, system, ui};
use crate::core::config::BackendsConfig;
use crate::core::error::{Result, TargzError};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extension produced by every gzip-compatible backend.
pub const GZIP_EXTENSION: &str = "gz";

/// The role a backend plays in selection, listed in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendKind {
    /// Slow, best ratio (e.g. `zopfli`). Only chosen below the size threshold.
    HighRatio,
    /// Fast, multi-threaded (e.g. `pigz`).
    Parallel,
    /// Expected on every system (e.g. `gzip`).
    Fallback,
}

impl BackendKind {
    /// All roles in preference order.
    pub const ALL: [BackendKind; 3] = [
        BackendKind::HighRatio,
        BackendKind::Parallel,
        BackendKind::Fallback,
    ];

    /// The name used for this role in configuration files.
    pub fn role(self) -> &'static str {
        match self {
            BackendKind::HighRatio => "high_ratio",
            BackendKind::Parallel => "parallel",
            BackendKind::Fallback => "fallback",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.role())
    }
}

/// A compression program the pipeline can hand the intermediate archive to.
pub trait CompressionBackend {
    /// The role this backend fills.
    fn kind(&self) -> BackendKind;

    /// Human-readable name, shown in progress output (e.g. `pigz`).
    fn name(&self) -> &str;

    /// Extension appended to the input file name by `compress`.
    fn extension(&self) -> &str {
        GZIP_EXTENSION
    }

    /// Whether this backend can be invoked on this host.
    fn is_available(&self) -> bool;

    /// Compresses `input` in place, producing `<input>.<extension>`.
    ///
    /// Must fail with `TargzError::BackendExecution` when the underlying program
    /// reports failure. On failure `input` is expected to still exist.
    fn compress(&self, input: &Path) -> Result<()>;
}

/// Returns `<input>.<extension>`.
pub fn compressed_path(input: &Path, extension: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// A backend implemented by an external program following the gzip
/// command-line conventions (`-v`, in-place compression, input removed).
#[derive(Debug, Clone)]
pub struct ExternalBackend {
    kind: BackendKind,
    program: String,
}

impl ExternalBackend {
    pub fn new(kind: BackendKind, program: impl Into<String>) -> Self {
        ExternalBackend {
            kind,
            program: program.into(),
        }
    }
}

impl CompressionBackend for ExternalBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        system::tool_available(&self.program).unwrap_or_else(|e| {
            warn!("Treating '{}' as unavailable: {:#}", self.program, e);
            false
        })
    }

    fn compress(&self, input: &Path) -> Result<()> {
        let status = process::run_streamed(&self.program, [OsStr::new("-v"), input.as_os_str()])
            .map_err(|e| {
                warn!("Could not start '{}': {:#}", self.program, e);
                TargzError::BackendUnavailable {
                    backend: self.program.clone(),
                }
            })?;
        if !status.success() {
            anyhow::bail!(TargzError::BackendExecution {
                backend: self.program.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Maps each backend role to the implementation used for it.
#[derive(Default)]
pub struct BackendRegistry {
    backends: BTreeMap<BackendKind, Box<dyn CompressionBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the production registry: one `ExternalBackend` per configured program.
    pub fn from_config(config: &BackendsConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ExternalBackend::new(
            BackendKind::HighRatio,
            config.high_ratio.as_str(),
        )));
        registry.register(Box::new(ExternalBackend::new(
            BackendKind::Parallel,
            config.parallel.as_str(),
        )));
        registry.register(Box::new(ExternalBackend::new(
            BackendKind::Fallback,
            config.fallback.as_str(),
        )));
        registry
    }

    /// Registers `backend` under its own kind, replacing any previous entry.
    pub fn register(&mut self, backend: Box<dyn CompressionBackend>) {
        debug!("Registering backend '{}' as {}", backend.name(), backend.kind());
        self.backends.insert(backend.kind(), backend);
    }

    pub fn get(&self, kind: BackendKind) -> Option<&dyn CompressionBackend> {
        self.backends.get(&kind).map(|backend| &**backend)
    }

    /// Registered backends in preference order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn CompressionBackend> {
        self.backends.values().map(|backend| &**backend)
    }

    /// Probes every registered backend and returns the kinds that can run here.
    pub fn available(&self) -> BTreeSet<BackendKind> {
        let available: BTreeSet<BackendKind> = self
            .iter()
            .filter(|backend| backend.is_available())
            .map(|backend| backend.kind())
            .collect();
        info!("Available compression backends: {:?}", available);
        available
    }
}

/// # Compress Intermediate Archive (`compress_archive`)
///
/// Runs `backend` on the uncompressed archive at `archive` (whose size,
/// `tar_size`, is only used for the progress line) and returns the path of the
/// compressed file.
///
/// ## Guarantees
///
/// - On success the intermediate archive no longer exists and the returned
///   path is an existing file.
/// - On backend failure the error is returned unchanged and the intermediate
///   archive is left where it is. No other backend is tried.
///
/// ## Errors
///
/// - `TargzError::BackendExecution` / `BackendUnavailable` from the backend.
/// - `TargzError::Io` if the backend reported success but the expected output
///   file does not exist, or the leftover intermediate cannot be removed.
pub fn compress_archive(
    archive: &Path,
    tar_size: u64,
    backend: &dyn CompressionBackend,
) -> Result<PathBuf> {
    println!("{}", ui::compressing_message(tar_size, backend.name()));
    info!(
        "Compressing {:?} ({} bytes) with '{}' ({})",
        archive,
        tar_size,
        backend.name(),
        backend.kind()
    );

    backend.compress(archive)?;

    let output = compressed_path(archive, backend.extension());
    if !output.is_file() {
        anyhow::bail!(TargzError::io(
            &output,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("`{}` reported success but produced no output", backend.name())
            )
        ));
    }
    if io::remove_file_if_exists(archive)? {
        debug!("Backend left {:?} behind; removed it.", archive);
    }
    Ok(output)
}
