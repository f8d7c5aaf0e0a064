//! Export, import, backup, and workspace replacement.
//!
//! # Responsibility
//! - Produce and consume detached share payloads for folder/file subtrees.
//! - Replace the whole workspace from an external document file.
//!
//! # Invariants
//! - Export never mutates the live document.
//! - Import discards payload provenance: every `created` is rewritten to now
//!   and block ids are regenerated.
//! - Name collisions resolve deterministically: `base`, `base_1`, `base_2`.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use crate::model::document::{now_timestamp, Document, Folder, NoteFile};
use crate::store::{DocumentStore, StoreError};
use crate::workspace::Workspace;

/// Detached, shareable copy of one folder or file subtree.
///
/// Tagged by `type` on the wire; an unknown or missing tag fails parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SharePayload {
    /// A folder and all files it contains.
    Folder { name: String, data: Folder },
    /// A single file and its blocks.
    File { name: String, data: NoteFile },
}

/// What an import inserted, with the collision-resolved final name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imported {
    /// Folder inserted at the document root under this name.
    Folder { name: String },
    /// File inserted into this folder under this name.
    File { folder: String, name: String },
}

/// Result type used by share operations.
pub type ShareResult<T> = Result<T, ShareServiceError>;

/// Errors from share operations.
#[derive(Debug)]
pub enum ShareServiceError {
    /// Source folder does not exist.
    FolderNotFound(String),
    /// Source file does not exist in its folder.
    FileNotFound { folder: String, file: String },
    /// Payload is malformed: bad JSON, unknown tag, or missing fields.
    InvalidPayload(String),
    /// File payload import with no target folder given or selected.
    MissingTargetFolder,
    /// Filesystem failure reading or writing a share file.
    Io(std::io::Error),
    /// Persistence failure; in-memory state is retained for retry.
    Store(StoreError),
}

impl Display for ShareServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderNotFound(name) => write!(f, "folder not found: `{name}`"),
            Self::FileNotFound { folder, file } => {
                write!(f, "file not found: `{file}` in folder `{folder}`")
            }
            Self::InvalidPayload(message) => write!(f, "invalid share payload: {message}"),
            Self::MissingTargetFolder => {
                write!(f, "file import requires a target folder")
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShareServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShareServiceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for ShareServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Share operation facade over one workspace handle.
pub struct ShareService<'ws, S: DocumentStore> {
    ws: &'ws mut Workspace<S>,
}

impl<'ws, S: DocumentStore> ShareService<'ws, S> {
    /// Creates the service over a workspace.
    pub fn new(ws: &'ws mut Workspace<S>) -> Self {
        Self { ws }
    }

    /// Writes a deep copy of one folder subtree to `dest`.
    pub fn export_folder(&self, name: &str, dest: &Path) -> ShareResult<()> {
        let folder = self
            .ws
            .document()
            .folders
            .get(name)
            .ok_or_else(|| ShareServiceError::FolderNotFound(name.to_string()))?;
        let payload = SharePayload::Folder {
            name: name.to_string(),
            data: folder.clone(),
        };
        write_payload(&payload, dest)?;
        info!("event=share_export module=share status=ok kind=folder name={name}");
        Ok(())
    }

    /// Writes a deep copy of one file subtree to `dest`.
    pub fn export_file(&self, folder: &str, file: &str, dest: &Path) -> ShareResult<()> {
        let source_folder = self
            .ws
            .document()
            .folders
            .get(folder)
            .ok_or_else(|| ShareServiceError::FolderNotFound(folder.to_string()))?;
        let source_file =
            source_folder
                .files
                .get(file)
                .ok_or_else(|| ShareServiceError::FileNotFound {
                    folder: folder.to_string(),
                    file: file.to_string(),
                })?;
        let payload = SharePayload::File {
            name: file.to_string(),
            data: source_file.clone(),
        };
        write_payload(&payload, dest)?;
        info!("event=share_export module=share status=ok kind=file folder={folder} name={file}");
        Ok(())
    }

    /// Writes the whole live document to `dest` as a backup copy.
    pub fn export_document(&self, dest: &Path) -> ShareResult<()> {
        let serialized = serde_json::to_string_pretty(self.ws.document())
            .map_err(|err| ShareServiceError::InvalidPayload(err.to_string()))?;
        fs::write(dest, serialized)?;
        info!(
            "event=doc_backup module=share status=ok dest={}",
            dest.display()
        );
        Ok(())
    }

    /// Reads a share payload and inserts it into the live document.
    ///
    /// Folder payloads land at the document root. File payloads land in
    /// `target_folder`, falling back to the currently open folder. All
    /// timestamps are rewritten to now and block ids regenerated; name
    /// collisions append `_1`, `_2`, ... to the base name.
    pub fn import(&mut self, path: &Path, target_folder: Option<&str>) -> ShareResult<Imported> {
        let raw = fs::read_to_string(path)?;
        let payload: SharePayload = serde_json::from_str(&raw)
            .map_err(|err| ShareServiceError::InvalidPayload(err.to_string()))?;
        let now = now_timestamp();

        match payload {
            SharePayload::Folder { name, mut data } => {
                data.created = now.clone();
                for file in data.files.values_mut() {
                    file.created = now.clone();
                    for block in &mut file.blocks {
                        block.refresh_provenance(&now);
                    }
                }

                let final_name = free_name(&self.ws.document.folders, &name);
                self.ws.document.folders.insert(final_name.clone(), data);
                self.ws.persist()?;
                info!("event=share_import module=share status=ok kind=folder name={final_name}");
                Ok(Imported::Folder { name: final_name })
            }
            SharePayload::File { name, mut data } => {
                let folder_name = target_folder
                    .map(str::to_string)
                    .or_else(|| self.ws.selection.folder.clone())
                    .ok_or(ShareServiceError::MissingTargetFolder)?;

                data.created = now.clone();
                for block in &mut data.blocks {
                    block.refresh_provenance(&now);
                }

                let target = self
                    .ws
                    .document
                    .folders
                    .get_mut(&folder_name)
                    .ok_or_else(|| ShareServiceError::FolderNotFound(folder_name.clone()))?;
                let final_name = free_name(&target.files, &name);
                target.files.insert(final_name.clone(), data);
                self.ws.persist()?;
                info!(
                    "event=share_import module=share status=ok kind=file folder={folder_name} name={final_name}"
                );
                Ok(Imported::File {
                    folder: folder_name,
                    name: final_name,
                })
            }
        }
    }

    /// Destructive whole-workspace replace from an external document file.
    ///
    /// The payload must carry a `folders` key; `meta` is back-filled when
    /// absent. On success both the in-memory document and the default
    /// on-disk document are overwritten. The caller must confirm with the
    /// user first.
    pub fn load_workspace(&mut self, path: &Path) -> ShareResult<()> {
        let raw = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|err| ShareServiceError::InvalidPayload(err.to_string()))?;

        if value.get("folders").is_none() {
            return Err(ShareServiceError::InvalidPayload(
                "missing `folders` key".to_string(),
            ));
        }

        let document: Document = serde_json::from_value(value)
            .map_err(|err| ShareServiceError::InvalidPayload(err.to_string()))?;
        self.ws.replace_document(document)?;
        Ok(())
    }
}

fn write_payload(payload: &SharePayload, dest: &Path) -> ShareResult<()> {
    let serialized = serde_json::to_string_pretty(payload)
        .map_err(|err| ShareServiceError::InvalidPayload(err.to_string()))?;
    fs::write(dest, serialized)?;
    Ok(())
}

/// First free name in `map`: `base` itself, then `base_1`, `base_2`, ...
fn free_name<V>(map: &BTreeMap<String, V>, base: &str) -> String {
    if !map.contains_key(base) {
        return base.to_string();
    }
    let mut attempt = 1u32;
    loop {
        let candidate = format!("{base}_{attempt}");
        if !map.contains_key(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}
