//! File-backed JSON document store.
//!
//! # Responsibility
//! - Read and write the single-document workspace file.
//! - Emit `doc_load`/`doc_save` events with duration and status.
//!
//! # Invariants
//! - `ensure_default` never overwrites an existing document.
//! - `save` updates `meta.last_modified` before serializing.

use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::model::document::{now_timestamp, Document};

use super::{DocumentStore, StoreError, StoreResult};

/// Document store persisting pretty-printed JSON at a fixed path.
pub struct JsonDocumentStore {
    path: PathBuf,
    base_dir: PathBuf,
}

impl JsonDocumentStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { path, base_dir }
    }

    /// Creates a store at the platform default workspace location.
    pub fn at_default_location() -> Self {
        Self::new(super::default_document_path())
    }
}

impl DocumentStore for JsonDocumentStore {
    fn ensure_default(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.base_dir)?;
        if self.path.exists() {
            return Ok(());
        }

        let document = Document::new();
        let serialized = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, serialized)?;
        info!(
            "event=doc_init module=store status=ok path={}",
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> StoreResult<Document> {
        let started_at = Instant::now();
        let result = fs::read_to_string(&self.path)
            .map_err(StoreError::from)
            .and_then(|raw| serde_json::from_str::<Document>(&raw).map_err(StoreError::from));

        match &result {
            Ok(document) => info!(
                "event=doc_load module=store status=ok duration_ms={} folders={}",
                started_at.elapsed().as_millis(),
                document.folders.len()
            ),
            Err(err) => error!(
                "event=doc_load module=store status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn save(&self, document: &mut Document) -> StoreResult<()> {
        let started_at = Instant::now();
        document.meta.last_modified = now_timestamp();

        let result = serde_json::to_string_pretty(document)
            .map_err(StoreError::from)
            .and_then(|serialized| fs::write(&self.path, serialized).map_err(StoreError::from));

        match &result {
            Ok(()) => info!(
                "event=doc_save module=store status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=doc_save module=store status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn location(&self) -> &Path {
        &self.path
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
