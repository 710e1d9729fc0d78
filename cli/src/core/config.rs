//! # targz Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates the targz configuration: the size
//! threshold that governs the high-ratio backend, the filename patterns that
//! are skipped while archiving, and the programs used for each compression
//! backend.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the `archive` command, not here)
//! 2. Project-specific `.targz.toml` in the current directory or an ancestor
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/targz/config.toml`)
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [archive]
//! threshold_bytes = 50000000
//! exclude = [".DS_Store", "*.swp"]
//!
//! [backends]
//! high_ratio = "zopfli"
//! parallel = "pigz"
//! fallback = "~/bin/gzip"
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let threshold = cfg.archive.threshold_bytes;
//! let gzip = &cfg.backends.fallback;
//! ```
//!
use crate::core::error::{Result, TargzError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Size (in bytes) below which the high-ratio backend is preferred.
pub const DEFAULT_THRESHOLD_BYTES: u64 = 50_000_000;

const PROJECT_CONFIG_FILENAME: &str = ".targz.toml";

/// The resolved configuration every command works with.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub backends: BackendsConfig,
}

/// Settings for building the intermediate archive and choosing a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Archives strictly smaller than this many bytes use the high-ratio backend when it is available.
    pub threshold_bytes: u64,
    /// Filename patterns (glob syntax) skipped while archiving.
    pub exclude: Vec<String>,
}

/// Program names (or paths, `~` allowed) for each compression backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendsConfig {
    pub high_ratio: String,
    pub parallel: String,
    pub fallback: String,
}

/// A single configuration file as written. Keys the file leaves out stay
/// `None`, so a lower layer (or the default) shows through.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    #[serde(default)]
    archive: ArchiveLayer,
    #[serde(default)]
    backends: BackendsLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ArchiveLayer {
    threshold_bytes: Option<u64>,
    exclude: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct BackendsLayer {
    high_ratio: Option<String>,
    parallel: Option<String>,
    fallback: Option<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        ArchiveConfig {
            threshold_bytes: default_threshold_bytes(),
            exclude: default_exclude(),
        }
    }
}

impl Default for BackendsConfig {
    fn default() -> Self {
        BackendsConfig {
            high_ratio: default_high_ratio(),
            parallel: default_parallel(),
            fallback: default_fallback(),
        }
    }
}

fn default_threshold_bytes() -> u64 {
    DEFAULT_THRESHOLD_BYTES
}
fn default_exclude() -> Vec<String> {
    vec![".DS_Store".to_string()]
}
fn default_high_ratio() -> String {
    "zopfli".to_string()
}
fn default_parallel() -> String {
    "pigz".to_string()
}
fn default_fallback() -> String {
    "gzip".to_string()
}

/// Loads the user and project configuration files, merges them over the
/// defaults, expands `~` in program paths and validates the result.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config, project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "targz", "targz") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigLayer>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.targz.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.targz.toml`.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Resolves each key from the project layer, then the user layer, then the
/// built-in default. A key set in a file always wins over the layers below it,
/// even when its value equals the default.
fn merge_configs(user: Option<ConfigLayer>, project: Option<ConfigLayer>) -> Config {
    let user = user.unwrap_or_default();
    let project = project.unwrap_or_default();
    Config {
        archive: ArchiveConfig {
            threshold_bytes: project
                .archive
                .threshold_bytes
                .or(user.archive.threshold_bytes)
                .unwrap_or_else(default_threshold_bytes),
            exclude: project
                .archive
                .exclude
                .or(user.archive.exclude)
                .unwrap_or_else(default_exclude),
        },
        backends: BackendsConfig {
            high_ratio: project
                .backends
                .high_ratio
                .or(user.backends.high_ratio)
                .unwrap_or_else(default_high_ratio),
            parallel: project
                .backends
                .parallel
                .or(user.backends.parallel)
                .unwrap_or_else(default_parallel),
            fallback: project
                .backends
                .fallback
                .or(user.backends.fallback)
                .unwrap_or_else(default_fallback),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    for program in [
        &mut config.backends.high_ratio,
        &mut config.backends.parallel,
        &mut config.backends.fallback,
    ] {
        *program = shellexpand::tilde(program.as_str()).into_owned();
        debug!("Expanded backend program: {}", program);
    }
}

/// Checks the merged configuration before it is used.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.archive.threshold_bytes == 0 {
        return Err(anyhow!(TargzError::Config(
            "archive.threshold_bytes must be greater than zero.".to_string()
        )));
    }
    for pattern in &config.archive.exclude {
        glob::Pattern::new(pattern).map_err(|e| {
            anyhow!(TargzError::Config(format!(
                "Invalid exclusion pattern '{}': {}",
                pattern, e
            )))
        })?;
    }
    for (role, program) in [
        ("high_ratio", &config.backends.high_ratio),
        ("parallel", &config.backends.parallel),
        ("fallback", &config.backends.fallback),
    ] {
        if program.trim().is_empty() {
            return Err(anyhow!(TargzError::Config(format!(
                "backends.{} cannot be an empty program name.",
                role
            ))));
        }
    }
    Ok(())
}
