//! # targz Archive Pipeline (`common::archive::pipeline`)
//!
//! File: cli/src/common/archive/pipeline.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The orchestrator. Given an `ArchiveRequest`, it runs the stages in order and
//! stops at the first error:
//!
//! 1. refuse to start if a compressed output already exists at the target
//! 2. build the uncompressed archive (`tar::build_archive`)
//! 3. probe the registry and pick a backend (`selector::select_backend`)
//! 4. compress (`compression::compress_archive`)
//! 5. measure the result and return an `ArchiveResult`
//!
//! The pipeline is synchronous and keeps no state between runs. Callers running
//! several pipelines at once must give each request its own output path.
//!
//! ## Failure outcomes
//!
//! | Failure                                | Intermediate `.tar` afterwards |
//! |----------------------------------------|--------------------------------|
//! | input missing / archive not writable   | never created / removed        |
//! | no backend available                   | removed                        |
//! | backend exits non-zero                 | kept for inspection            |
//!
use super::compression::{self, BackendKind, BackendRegistry};
use super::selector;
use super::tar::{self, ExclusionSet};
use crate::common::fs::io;
use crate::core::error::{Result, TargzError};
use anyhow::Context;
use std::path::PathBuf;
use tracing::{info, warn};

/// What to archive and where to put the intermediate archive.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub paths: Vec<PathBuf>,
    pub exclude: ExclusionSet,
    /// Path of the uncompressed intermediate archive; the compressed file is
    /// written next to it with the backend's extension appended.
    pub output: PathBuf,
}

impl ArchiveRequest {
    /// Creates a request, deriving the intermediate path from the first input
    /// (`<first input>.tar`) when `output` is `None`.
    ///
    /// # Errors
    ///
    /// Fails when `paths` is empty.
    pub fn new(
        paths: Vec<PathBuf>,
        exclude: ExclusionSet,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let first = paths
            .first()
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!("No input paths given; pass at least one file or directory.")
            })?;
        let output = match output {
            Some(output) => output,
            None => tar::default_archive_path(&first)?,
        };
        Ok(ArchiveRequest {
            paths,
            exclude,
            output,
        })
    }
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveResult {
    /// The compressed archive (`<output>.gz`).
    pub archive_path: PathBuf,
    /// Size of the uncompressed intermediate archive in bytes.
    pub original_size: u64,
    /// Size of the compressed archive in bytes.
    pub compressed_size: u64,
    pub backend: BackendKind,
    /// Name of the backend program that ran.
    pub backend_name: String,
}

/// Runs requests against an injected backend registry.
pub struct ArchivePipeline<'a> {
    registry: &'a BackendRegistry,
    threshold: u64,
}

impl<'a> ArchivePipeline<'a> {
    pub fn new(registry: &'a BackendRegistry, threshold: u64) -> Self {
        ArchivePipeline {
            registry,
            threshold,
        }
    }

    /// Runs every stage for `request`. See the module docs for the failure outcomes.
    pub fn run(&self, request: &ArchiveRequest) -> Result<ArchiveResult> {
        for backend in self.registry.iter() {
            let target = compression::compressed_path(&request.output, backend.extension());
            if target.exists() {
                anyhow::bail!(TargzError::io(
                    &target,
                    std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "compressed archive already exists; remove it or choose another --output"
                    )
                ));
            }
        }

        let original_size = tar::build_archive(&request.paths, &request.exclude, &request.output)
            .context("Failed to build the archive")?;

        let available = self.registry.available();
        let selected = selector::select_backend(original_size, self.threshold, &available)
            .and_then(|kind| self.registry.get(kind));
        let backend = match selected {
            Some(backend) => backend,
            None => {
                if let Err(e) = io::remove_file_if_exists(&request.output) {
                    warn!("Failed to remove {:?}: {:#}", request.output, e);
                }
                let fallback = self
                    .registry
                    .get(BackendKind::Fallback)
                    .map(|backend| backend.name().to_string())
                    .unwrap_or_else(|| BackendKind::Fallback.role().to_string());
                anyhow::bail!(TargzError::BackendUnavailable { backend: fallback });
            }
        };
        info!(
            "Selected '{}' ({}) for {} bytes",
            backend.name(),
            backend.kind(),
            original_size
        );

        let archive_path = compression::compress_archive(&request.output, original_size, backend)?;
        let compressed_size = io::file_size(&archive_path)?;

        Ok(ArchiveResult {
            archive_path,
            original_size,
            compressed_size,
            backend: backend.kind(),
            backend_name: backend.name().to_string(),
        })
    }
}
