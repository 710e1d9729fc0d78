//! # targz Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `targz` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Handing off to the archive command
//! - Reporting errors and the exit status
//!
//! ## Examples
//!
//! ```bash
//! # Archive and compress a directory
//! targz project/
//!
//! # Same, with debug logging on stderr
//! targz -vv project/
//! ```
//!
//! Processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (or `RUST_LOG`)
//! 3. Run the archive command
//! 4. On error, print `Error: <message>` to stderr and exit with status 1
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers
mod common; // Shared utilities (archive, fs, process, system, ui)
mod core; // Core infrastructure (errors, config)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "targz",
    about = "Create a .tar.gz using the best available gzip-compatible compressor",
    long_about = "Archives the given files and directories into a .tar, then compresses it with\n\
                  zopfli (archives under the size threshold), pigz, or gzip, whichever is\n\
                  available first, and reports the size before and after.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(flatten)]
    archive: commands::archive::ArchiveArgs,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::archive::handle_archive(cli.archive) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
