//! Folder and file tree operations.
//!
//! # Responsibility
//! - Create, rename, and delete folders and files with collision handling.
//! - Keep the open selection coherent across renames and deletes.
//!
//! # Invariants
//! - Names are trimmed; blank names are rejected.
//! - Uniqueness is case-sensitive within one parent mapping.
//! - Delete cascades to all children and is not reversible; confirmation is
//!   a boundary concern.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::document::{Folder, NoteFile};
use crate::store::{DocumentStore, StoreError};
use crate::workspace::Workspace;

/// Result type used by tree operations.
pub type TreeResult<T> = Result<T, TreeServiceError>;

/// Errors from folder/file tree operations.
#[derive(Debug)]
pub enum TreeServiceError {
    /// Name is blank after trimming.
    EmptyName,
    /// Name already exists in the target mapping.
    DuplicateName(String),
    /// Target folder does not exist.
    FolderNotFound(String),
    /// Target file does not exist in its folder.
    FileNotFound { folder: String, file: String },
    /// Persistence failure; in-memory state is retained for retry.
    Store(StoreError),
}

impl Display for TreeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be blank"),
            Self::DuplicateName(name) => write!(f, "name already exists: `{name}`"),
            Self::FolderNotFound(name) => write!(f, "folder not found: `{name}`"),
            Self::FileNotFound { folder, file } => {
                write!(f, "file not found: `{file}` in folder `{folder}`")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TreeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TreeServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Tree operation facade over one workspace handle.
pub struct TreeService<'ws, S: DocumentStore> {
    ws: &'ws mut Workspace<S>,
}

impl<'ws, S: DocumentStore> TreeService<'ws, S> {
    /// Creates the service over a workspace.
    pub fn new(ws: &'ws mut Workspace<S>) -> Self {
        Self { ws }
    }

    /// Creates an empty folder at the document root.
    pub fn create_folder(&mut self, name: impl Into<String>) -> TreeResult<()> {
        let name = normalize_name(name.into())?;
        if self.ws.document.folders.contains_key(&name) {
            return Err(TreeServiceError::DuplicateName(name));
        }
        self.ws.document.folders.insert(name.clone(), Folder::new());
        self.ws.persist()?;
        info!("event=folder_create module=tree status=ok name={name}");
        Ok(())
    }

    /// Renames a folder, following the open selection if it pointed there.
    pub fn rename_folder(&mut self, old: &str, new: impl Into<String>) -> TreeResult<()> {
        let new = normalize_name(new.into())?;
        if new == old {
            return Ok(());
        }
        if self.ws.document.folders.contains_key(&new) {
            return Err(TreeServiceError::DuplicateName(new));
        }
        let folder = self
            .ws
            .document
            .folders
            .remove(old)
            .ok_or_else(|| TreeServiceError::FolderNotFound(old.to_string()))?;
        self.ws.document.folders.insert(new.clone(), folder);

        if self.ws.selection.folder.as_deref() == Some(old) {
            self.ws.selection.folder = Some(new.clone());
        }
        self.ws.persist()?;
        info!("event=folder_rename module=tree status=ok from={old} to={new}");
        Ok(())
    }

    /// Deletes a folder and every file it contains.
    pub fn delete_folder(&mut self, name: &str) -> TreeResult<()> {
        if self.ws.document.folders.remove(name).is_none() {
            return Err(TreeServiceError::FolderNotFound(name.to_string()));
        }
        if self.ws.selection.folder.as_deref() == Some(name) {
            self.ws.clear_selection();
        }
        self.ws.persist()?;
        info!("event=folder_delete module=tree status=ok name={name}");
        Ok(())
    }

    /// Creates an empty file inside `folder`.
    pub fn create_file(&mut self, folder: &str, name: impl Into<String>) -> TreeResult<()> {
        let name = normalize_name(name.into())?;
        let target = self
            .ws
            .document
            .folders
            .get_mut(folder)
            .ok_or_else(|| TreeServiceError::FolderNotFound(folder.to_string()))?;
        if target.files.contains_key(&name) {
            return Err(TreeServiceError::DuplicateName(name));
        }
        target.files.insert(name.clone(), NoteFile::new());
        self.ws.persist()?;
        info!("event=file_create module=tree status=ok folder={folder} name={name}");
        Ok(())
    }

    /// Renames a file within `folder`, following the open selection.
    pub fn rename_file(
        &mut self,
        folder: &str,
        old: &str,
        new: impl Into<String>,
    ) -> TreeResult<()> {
        let new = normalize_name(new.into())?;
        if new == old {
            return Ok(());
        }
        let target = self
            .ws
            .document
            .folders
            .get_mut(folder)
            .ok_or_else(|| TreeServiceError::FolderNotFound(folder.to_string()))?;
        if target.files.contains_key(&new) {
            return Err(TreeServiceError::DuplicateName(new));
        }
        let file = target
            .files
            .remove(old)
            .ok_or_else(|| TreeServiceError::FileNotFound {
                folder: folder.to_string(),
                file: old.to_string(),
            })?;
        target.files.insert(new.clone(), file);

        if self.ws.selection.folder.as_deref() == Some(folder)
            && self.ws.selection.file.as_deref() == Some(old)
        {
            self.ws.selection.file = Some(new.clone());
        }
        self.ws.persist()?;
        info!("event=file_rename module=tree status=ok folder={folder} from={old} to={new}");
        Ok(())
    }

    /// Deletes a file and every block it contains.
    pub fn delete_file(&mut self, folder: &str, name: &str) -> TreeResult<()> {
        let target = self
            .ws
            .document
            .folders
            .get_mut(folder)
            .ok_or_else(|| TreeServiceError::FolderNotFound(folder.to_string()))?;
        if target.files.remove(name).is_none() {
            return Err(TreeServiceError::FileNotFound {
                folder: folder.to_string(),
                file: name.to_string(),
            });
        }
        if self.ws.selection.folder.as_deref() == Some(folder)
            && self.ws.selection.file.as_deref() == Some(name)
        {
            self.ws.selection.file = None;
        }
        self.ws.persist()?;
        info!("event=file_delete module=tree status=ok folder={folder} name={name}");
        Ok(())
    }
}

fn normalize_name(value: String) -> TreeResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TreeServiceError::EmptyName);
    }
    Ok(trimmed.to_string())
}
