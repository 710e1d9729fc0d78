//! Mock compression backends for unit tests.
//!
//! `MockBackend` stands in for `zopfli`/`pigz`/`gzip` so the selector,
//! compressor and pipeline can be exercised without depending on which tools
//! the test host has installed. The `Gzip` behaviour does real gzip
//! compression in-process with `flate2`, so output sizes are meaningful.

use super::compression::{compressed_path, BackendKind, BackendRegistry, CompressionBackend};
use crate::core::error::{Result, TargzError};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::cell::Cell;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

/// What a `MockBackend` does when asked to compress.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Gzip the input into `<input>.gz` and remove the input.
    Gzip,
    /// Gzip the input but leave the input file in place.
    KeepInput,
    /// Report success without writing anything.
    NoOutput,
    /// Exit with the given status code, touching nothing.
    Fail(i32),
}

#[derive(Debug)]
pub struct MockBackend {
    kind: BackendKind,
    name: String,
    available: bool,
    behavior: MockBehavior,
    calls: Rc<Cell<usize>>,
}

impl MockBackend {
    pub fn new(kind: BackendKind, available: bool, behavior: MockBehavior) -> Self {
        MockBackend {
            kind,
            name: format!("mock-{}", kind.role()),
            available,
            behavior,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Number of times `compress` has been called.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// A handle on the call counter that outlives moving the mock into a registry.
    pub fn call_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl CompressionBackend for MockBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn compress(&self, input: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        match self.behavior {
            MockBehavior::Gzip => {
                gzip_file(input)?;
                fs::remove_file(input)?;
            }
            MockBehavior::KeepInput => gzip_file(input)?,
            MockBehavior::NoOutput => {}
            MockBehavior::Fail(code) => anyhow::bail!(TargzError::BackendExecution {
                backend: self.name.clone(),
                code: Some(code),
            }),
        }
        Ok(())
    }
}

fn gzip_file(input: &Path) -> Result<()> {
    let mut reader = BufReader::new(File::open(input)?);
    let output = File::create(compressed_path(input, "gz"))?;
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Builds a registry of gzip mocks; `available[i]` applies to
/// `BackendKind::ALL[i]` (high-ratio, parallel, fallback).
pub fn mock_registry(available: [bool; 3]) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    for (kind, is_available) in BackendKind::ALL.into_iter().zip(available) {
        registry.register(Box::new(MockBackend::new(
            kind,
            is_available,
            MockBehavior::Gzip,
        )));
    }
    registry
}
