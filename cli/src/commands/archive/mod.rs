//! # targz Archive Command
//!
//! File: cli/src/commands/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the one thing `targz` does: archive the given paths
//! into `<name>.tar`, compress that with the best available backend, and report
//! the sizes before and after.
//!
//! ## Architecture
//!
//! 1. Load the layered configuration (`core::config`).
//! 2. Build the backend registry from the configured programs.
//! 3. With `--list-backends`, print the registry and stop.
//! 4. Apply command-line overrides (threshold, extra exclusions, output path).
//! 5. Run the `ArchivePipeline` and print the summary line.
//! 6. With `--verify`, read the finished archive back and count its entries.
//!
//! ## Usage
//!
//! ```bash
//! # Archive a directory into photos.tar.gz
//! targz photos/
//!
//! # Several inputs, explicit output, extra exclusions
//! targz -o release.tar -e '*.log' -e target bin/ README.md
//!
//! # Always skip zopfli by lowering the threshold, and check the result
//! targz --threshold 1 --verify big-dataset/
//!
//! # Which compressors will be used on this machine?
//! targz --list-backends
//! ```
//!
use crate::common::archive::{
    tar, ArchivePipeline, ArchiveRequest, BackendRegistry, ExclusionSet,
};
use crate::common::ui;
use crate::core::config::{self, Config};
use crate::core::error::{Result, TargzError};
use anyhow::{anyhow, Context};
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

/// # Archive Arguments (`ArchiveArgs`)
///
/// The paths to archive plus the options that override configuration for a
/// single run.
#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Files and directories to archive, in order.
    #[arg(required_unless_present = "list_backends", value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Path of the intermediate `.tar` (the result is this path plus `.gz`).
    /// Defaults to `<first PATH>.tar` next to the first input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Archives smaller than this many bytes use the high-ratio backend when available.
    #[arg(long, value_name = "BYTES", env = "TARGZ_THRESHOLD")]
    pub threshold: Option<u64>,

    /// Additional filename pattern to leave out of the archive (repeatable).
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Re-read the finished archive and check that it decompresses.
    #[arg(long)]
    pub verify: bool,

    /// Show the configured backends and whether each is installed, then exit.
    #[arg(long, conflicts_with_all = ["output", "verify"])]
    pub list_backends: bool,
}

/// # Handle Archive Command (`handle_archive`)
///
/// Entry point called from `main`. Loads configuration and dispatches to
/// either the backend listing or the archive pipeline.
///
/// ## Errors
///
/// Propagates configuration errors and every pipeline error unchanged
/// (`TargzError::Io`, `BackendUnavailable`, `BackendExecution`) so `main` can
/// report them and exit with status 1.
pub fn handle_archive(args: ArchiveArgs) -> Result<()> {
    info!("Handling archive command with args: {:?}", args);
    let cfg = config::load_config()?;
    let registry = BackendRegistry::from_config(&cfg.backends);

    if args.list_backends {
        list_backends(&registry);
        return Ok(());
    }

    let threshold = effective_threshold(&args, &cfg)?;
    let exclude = ExclusionSet::new(cfg.archive.exclude.iter().chain(args.excludes.iter()))
        .context("Invalid exclusion pattern on the command line")?;
    let request = ArchiveRequest::new(args.paths, exclude, args.output)?;
    debug!("Archive request: {:?}", request);

    let result = ArchivePipeline::new(&registry, threshold).run(&request)?;
    println!(
        "{}",
        ui::created_message(&result.archive_path, result.compressed_size)
    );
    info!(
        "{} -> {} bytes using '{}'",
        result.original_size, result.compressed_size, result.backend_name
    );

    if args.verify {
        let entries = tar::count_entries(&result.archive_path).with_context(|| {
            format!(
                "Verification of {} failed",
                result.archive_path.display()
            )
        })?;
        println!(
            "Verified {} ({} entries).",
            result.archive_path.display(),
            entries
        );
    }
    Ok(())
}

fn effective_threshold(args: &ArchiveArgs, cfg: &Config) -> Result<u64> {
    match args.threshold {
        Some(0) => Err(anyhow!(TargzError::Config(
            "--threshold must be greater than zero.".to_string()
        ))),
        Some(threshold) => Ok(threshold),
        None => Ok(cfg.archive.threshold_bytes),
    }
}

fn list_backends(registry: &BackendRegistry) {
    println!("Compression backends (in order of preference):");
    for backend in registry.iter() {
        println!(
            "{}",
            ui::backend_row(
                backend.kind().role(),
                backend.name(),
                backend.is_available()
            )
        );
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: ArchiveArgs,
    }

    fn parse(argv: &[&str]) -> std::result::Result<ArchiveArgs, clap::Error> {
        TestCli::try_parse_from(argv).map(|cli| cli.args)
    }

    #[test]
    fn test_archive_args_parsing() {
        let args = parse(&["targz", "-o", "out.tar", "-e", "*.log", "-e", "tmp", "a", "b/"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("a"), PathBuf::from("b/")]);
        assert_eq!(args.output, Some(PathBuf::from("out.tar")));
        assert_eq!(args.excludes, vec!["*.log", "tmp"]);
        assert!(!args.verify);
        assert!(!args.list_backends);
    }

    #[test]
    fn test_paths_required_unless_listing() {
        assert!(parse(&["targz"]).is_err());
        let args = parse(&["targz", "--list-backends"]).unwrap();
        assert!(args.list_backends);
        assert!(args.paths.is_empty());
    }

    #[test]
    fn test_list_backends_conflicts_with_verify() {
        assert!(parse(&["targz", "--list-backends", "--verify"]).is_err());
    }

    #[test]
    fn test_effective_threshold() {
        let cfg = Config::default();
        let args = parse(&["targz", "x"]).unwrap();
        assert_eq!(effective_threshold(&args, &cfg).unwrap(), 50_000_000);

        let args = parse(&["targz", "--threshold", "1024", "x"]).unwrap();
        assert_eq!(effective_threshold(&args, &cfg).unwrap(), 1024);

        let args = parse(&["targz", "--threshold", "0", "x"]).unwrap();
        assert!(effective_threshold(&args, &cfg)
            .unwrap_err()
            .to_string()
            .contains("greater than zero"));
    }
}
