//! # targz TAR Archive Operations (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module builds the intermediate, uncompressed TAR archive from the
//! paths given on the command line, and reads a finished `.tar.gz` back for
//! verification.
//!
//! ## Architecture
//!
//! The module leverages the `tar` crate for the archive structure, `walkdir`
//! for traversal and `glob` for exclusion patterns.
//!
//! - Every input must exist before the output file is created, and the output
//!   itself must not exist yet.
//! - Each input is stored under its final path component, so `src/` becomes
//!   `src/...` inside the archive and `.` becomes the current directory's name.
//! - Directory children are visited in file-name order. Symlinks are stored as
//!   links, never followed.
//! - Any path component matching an exclusion pattern (default `.DS_Store`) is
//!   skipped together with everything below it.
//! - If anything fails after the output file was created, the partial file is
//!   removed before the error is returned.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::tar;
//!
//! let inputs = vec![PathBuf::from("notes"), PathBuf::from("todo.txt")];
//! let output = tar::default_archive_path(&inputs[0])?; // notes.tar
//! let size = tar::build_archive(&inputs, &tar::ExclusionSet::default(), &output)?;
//! println!("{} is {} bytes", output.display(), size);
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{Result, TargzError};
use flate2::read::MultiGzDecoder;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// Filename patterns excluded from the archive.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: Vec<glob::Pattern>,
}

impl ExclusionSet {
    /// Compiles `patterns` (glob syntax, matched against single path components).
    ///
    /// # Errors
    ///
    /// Returns `TargzError::Config` for a pattern that does not compile.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                glob::Pattern::new(p.as_ref()).map_err(|e| {
                    TargzError::Config(format!(
                        "Invalid exclusion pattern '{}': {}",
                        p.as_ref(),
                        e
                    ))
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ExclusionSet { patterns })
    }

    /// An empty set; nothing is excluded.
    pub fn empty() -> Self {
        ExclusionSet {
            patterns: Vec::new(),
        }
    }

    /// Whether a single path component (file or directory name) is excluded.
    pub fn matches(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        self.patterns.iter().any(|pattern| pattern.matches(&name))
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        // ".DS_Store" has no glob metacharacters, so this cannot fail.
        Self::new([".DS_Store"]).unwrap_or_else(|_| Self::empty())
    }
}

/// Resolves `input` to a path whose final component names it. Only `.`, `..`
/// and paths ending in `..` need the filesystem for this.
fn named_path(input: &Path) -> Result<PathBuf> {
    if input.file_name().is_some() {
        return Ok(input.to_path_buf());
    }
    let canonical = fs::canonicalize(input).map_err(|e| TargzError::io(input, e))?;
    if canonical.file_name().is_none() {
        anyhow::bail!(TargzError::io(
            input,
            std::io::Error::new(ErrorKind::InvalidInput, "cannot archive the filesystem root")
        ));
    }
    Ok(canonical)
}

/// The name an input is stored under inside the archive.
fn entry_root(input: &Path) -> Result<PathBuf> {
    let named = named_path(input)?;
    // named_path guarantees a final component.
    Ok(named.file_name().map(PathBuf::from).unwrap_or_default())
}

/// Default location of the intermediate archive: `<input>.tar` next to `input`
/// (`photos/` → `photos.tar`, `.` → `../<cwd name>.tar`).
pub fn default_archive_path(input: &Path) -> Result<PathBuf> {
    let named = named_path(input)?;
    let mut file_name = named.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tar");
    Ok(named.with_file_name(file_name))
}

/// # Build Intermediate Archive (`build_archive`)
///
/// Writes an uncompressed TAR archive containing every path in `inputs`
/// (recursively) to `output` and returns the archive size in bytes.
///
/// ## Errors
///
/// Returns `TargzError::Io` if:
/// - `inputs` is empty.
/// - Any input does not exist or cannot be read (checked before `output` is created).
/// - `output` already exists (`AlreadyExists`). It may be one of the inputs,
///   and a leftover intermediate is never replaced silently.
/// - `output` cannot be created or written.
///
/// On error no partial archive is left at `output`, and nothing that existed
/// before the call is touched.
pub fn build_archive(inputs: &[PathBuf], exclude: &ExclusionSet, output: &Path) -> Result<u64> {
    if inputs.is_empty() {
        anyhow::bail!(TargzError::io(
            output,
            std::io::Error::new(ErrorKind::InvalidInput, "no input paths given")
        ));
    }

    let mut roots = Vec::with_capacity(inputs.len());
    for input in inputs {
        fs::symlink_metadata(input).map_err(|e| TargzError::io(input, e))?;
        roots.push(entry_root(input)?);
    }

    if fs::symlink_metadata(output).is_ok() {
        anyhow::bail!(TargzError::io(
            output,
            std::io::Error::new(
                ErrorKind::AlreadyExists,
                "intermediate archive already exists; remove it or choose another --output"
            )
        ));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        io::ensure_dir_exists(parent)?;
    }
    let file = File::create(output).map_err(|e| TargzError::io(output, e))?;
    info!("Building archive {:?} from {} input(s)", output, inputs.len());

    match write_entries(file, inputs, &roots, exclude, output) {
        Ok(count) => {
            let size = io::file_size(output)?;
            info!("Archived {} entries into {:?} ({} bytes)", count, output, size);
            Ok(size)
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(output) {
                warn!("Failed to remove partial archive {:?}: {}", output, cleanup);
            }
            Err(e)
        }
    }
}

fn write_entries(
    file: File,
    inputs: &[PathBuf],
    roots: &[PathBuf],
    exclude: &ExclusionSet,
    output: &Path,
) -> Result<usize> {
    // The archive must not swallow itself when written inside an input directory.
    let output_canonical = fs::canonicalize(output).ok();
    let mut builder = tar::Builder::new(BufWriter::new(file));
    builder.follow_symlinks(false);
    let mut count = 0;

    for (input, root) in inputs.iter().zip(roots) {
        let walker = WalkDir::new(input)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !exclude.matches(entry.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(input, e))?;
            let path = entry.path();

            if entry.file_type().is_file() {
                if let Some(skip) = output_canonical.as_deref() {
                    if fs::canonicalize(path).ok().as_deref() == Some(skip) {
                        debug!("Skipping the archive being written: {:?}", path);
                        continue;
                    }
                }
            }

            let name = match path.strip_prefix(input) {
                Ok(rel) if rel.as_os_str().is_empty() => root.clone(),
                Ok(rel) => root.join(rel),
                Err(_) => continue,
            };
            builder
                .append_path_with_name(path, &name)
                .map_err(|e| TargzError::io(path, e))?;
            trace!("Added {:?} as {:?}", path, name);
            count += 1;
        }
    }

    let writer = builder
        .into_inner()
        .map_err(|e| TargzError::io(output, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| TargzError::io(output, e.into_error()))?;
    file.sync_all().map_err(|e| TargzError::io(output, e))?;
    Ok(count)
}

fn walk_error(input: &Path, err: walkdir::Error) -> TargzError {
    let path = err.path().unwrap_or(input).to_path_buf();
    let source = err.into_io_error().unwrap_or_else(|| {
        std::io::Error::new(ErrorKind::Other, "filesystem loop detected")
    });
    TargzError::Io { path, source }
}

/// Opens a gzip-compressed TAR archive and counts its entries, reading it
/// end to end. Fails with `TargzError::Io` if the file is not a valid
/// `.tar.gz`.
pub fn count_entries(archive: &Path) -> Result<usize> {
    let file = File::open(archive).map_err(|e| TargzError::io(archive, e))?;
    let mut tar_archive = tar::Archive::new(MultiGzDecoder::new(BufReader::new(file)));
    let mut count = 0;
    for entry in tar_archive
        .entries()
        .map_err(|e| TargzError::io(archive, e))?
    {
        entry.map_err(|e| TargzError::io(archive, e))?;
        count += 1;
    }
    debug!("{:?} holds {} entries", archive, count);
    Ok(count)
}
