//! Catalog output sinks.
//!
//! The sink accepts the final ranked sequence and serializes it with the
//! exact field order and rounding the data model defines. Behind a trait so
//! tests capture output in memory instead of touching disk. A sink failure
//! is a top-level pipeline failure — distinct from "zero objects found",
//! which is a successful (empty) run.

use crate::types::CatalogEntry;
use std::path::PathBuf;
use std::sync::RwLock;
use thiserror::Error;

/// Sink errors.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("write error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Trait for catalog output backends.
pub trait CatalogSink: Send + Sync {
    /// Write the full ordered entry sequence. Replaces any previous output;
    /// each run is one snapshot.
    fn write(&self, entries: &[CatalogEntry]) -> Result<(), SinkError>;

    /// Backend name for logging.
    fn sink_name(&self) -> &'static str;
}

// ============================================================================
// JSON File Sink
// ============================================================================

/// Writes the catalog as pretty-printed JSON to a file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CatalogSink for JsonFileSink {
    fn write(&self, entries: &[CatalogEntry]) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json).map_err(|source| SinkError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(
            path = %self.path.display(),
            entries = entries.len(),
            "Catalog written"
        );
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "json-file"
    }
}

// ============================================================================
// In-Memory Sink (tests)
// ============================================================================

/// Captures the last written catalog in memory.
pub struct InMemorySink {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// The last written entry sequence.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.entries
            .read()
            .map(|e| e.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSink for InMemorySink {
    fn write(&self, entries: &[CatalogEntry]) -> Result<(), SinkError> {
        let mut store = self
            .entries
            .write()
            .map_err(|e| SinkError::Storage(e.to_string()))?;
        *store = entries.to_vec();
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "in-memory"
    }
}
