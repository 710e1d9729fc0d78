//! # targz Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything needed to turn a list of paths into a compressed `.tar.gz`,
//! split by pipeline stage:
//!
//! - **`tar`**: Builds the uncompressed intermediate archive; reads finished
//!   archives back for verification.
//! - **`compression`**: Backend roles, the `CompressionBackend` trait, the
//!   registry, and the compressor stage.
//! - **`selector`**: Picks a backend from the archive size and the set of
//!   available backends.
//! - **`pipeline`**: Runs the stages in order and produces an `ArchiveResult`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{ArchivePipeline, ArchiveRequest, BackendRegistry, ExclusionSet};
//!
//! let registry = BackendRegistry::from_config(&cfg.backends);
//! let request = ArchiveRequest::new(paths, ExclusionSet::default(), None)?;
//! let result = ArchivePipeline::new(&registry, cfg.archive.threshold_bytes).run(&request)?;
//! println!("{} bytes -> {} bytes", result.original_size, result.compressed_size);
//! ```
//!

pub mod compression;
pub mod pipeline;
pub mod selector;
pub mod tar;

#[cfg(test)]
pub(crate) mod testing;

pub use self::compression::BackendRegistry;
pub use self::pipeline::{ArchivePipeline, ArchiveRequest};
pub use self::tar::ExclusionSet;
