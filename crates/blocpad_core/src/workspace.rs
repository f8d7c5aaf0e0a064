//! Workspace handle: the active document plus its backing store.
//!
//! # Responsibility
//! - Own the in-memory document and the current folder/file selection.
//! - Funnel every persisted mutation through one `persist` path.
//!
//! # Invariants
//! - There is no global state: every operation receives this handle.
//! - The document is mutated only by the thread owning the handle; no
//!   operation suspends mid-flight.

use log::info;

use crate::model::document::Document;
use crate::store::{DocumentStore, StoreResult};
use std::path::Path;

/// The folder/file the presentation layer currently has open.
///
/// Tree operations keep this reference coherent across rename and delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Name of the open folder, if any.
    pub folder: Option<String>,
    /// Name of the open file within the open folder, if any.
    pub file: Option<String>,
}

/// Active document, its store, and the open selection.
pub struct Workspace<S: DocumentStore> {
    pub(crate) store: S,
    pub(crate) document: Document,
    pub(crate) selection: Selection,
}

impl<S: DocumentStore> Workspace<S> {
    /// Opens the workspace: creates the default document when absent, then
    /// loads it.
    pub fn open(store: S) -> StoreResult<Self> {
        store.ensure_default()?;
        let document = store.load()?;
        Ok(Self {
            store,
            document,
            selection: Selection::default(),
        })
    }

    /// Read access to the live document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The current open folder/file reference.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Path of the backing document file.
    pub fn location(&self) -> &Path {
        self.store.location()
    }

    /// Directory asset paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.store.base_dir()
    }

    /// Marks a folder as open. Returns `false` when the folder is unknown.
    pub fn select_folder(&mut self, name: &str) -> bool {
        if !self.document.folders.contains_key(name) {
            return false;
        }
        self.selection.folder = Some(name.to_string());
        self.selection.file = None;
        true
    }

    /// Marks a file in the open folder as open. Returns `false` when the
    /// selection has no folder or the file is unknown.
    pub fn select_file(&mut self, name: &str) -> bool {
        let Some(folder_name) = self.selection.folder.as_deref() else {
            return false;
        };
        let known = self
            .document
            .folders
            .get(folder_name)
            .is_some_and(|folder| folder.files.contains_key(name));
        if !known {
            return false;
        }
        self.selection.file = Some(name.to_string());
        true
    }

    /// Returns to the browse root.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    /// Persists the live document to the backing store.
    pub fn persist(&mut self) -> StoreResult<()> {
        self.store.save(&mut self.document)
    }

    /// Destructive whole-document replace: swaps in `document`, resets the
    /// selection, and overwrites the backing file.
    ///
    /// The caller is responsible for user confirmation; this is not
    /// reversible.
    pub fn replace_document(&mut self, document: Document) -> StoreResult<()> {
        self.document = document;
        self.selection = Selection::default();
        self.persist()?;
        info!(
            "event=workspace_replace module=workspace status=ok folders={}",
            self.document.folders.len()
        );
        Ok(())
    }
}
