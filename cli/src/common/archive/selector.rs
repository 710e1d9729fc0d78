//! # targz Backend Selection (`common::archive::selector`)
//!
//! File: cli/src/common/archive/selector.rs
//! Author: Christi Mahu
//!
//! Chooses which compression backend to use for an archive of a given size.
//! The decision depends only on its inputs, so it is tested with synthetic
//! availability sets rather than whatever is installed on the host.
//!
//! Rules, first match wins:
//! 1. size < threshold and the high-ratio backend is available → high-ratio
//! 2. the parallel backend is available → parallel
//! 3. the fallback backend is available → fallback
//!
//! If none of these match (the fallback itself is missing) there is no
//! selection; the pipeline turns that into `TargzError::BackendUnavailable`.
//!
use super::compression::BackendKind;
use std::collections::BTreeSet;
use tracing::debug;

/// Selects a backend for an uncompressed archive of `size` bytes.
///
/// Returns `None` only when the fallback is needed but not in `available`.
pub fn select_backend(
    size: u64,
    threshold: u64,
    available: &BTreeSet<BackendKind>,
) -> Option<BackendKind> {
    let selected = if size < threshold && available.contains(&BackendKind::HighRatio) {
        Some(BackendKind::HighRatio)
    } else if available.contains(&BackendKind::Parallel) {
        Some(BackendKind::Parallel)
    } else if available.contains(&BackendKind::Fallback) {
        Some(BackendKind::Fallback)
    } else {
        None
    };
    debug!(
        "Selected {:?} for {} bytes (threshold {}, available {:?})",
        selected, size, threshold, available
    );
    selected
}
