//! Block operations within one file.
//!
//! # Responsibility
//! - Append, edit, and delete content blocks with validation.
//! - Route image content through asset intake.
//!
//! # Invariants
//! - Non-image content is trimmed and must be non-empty.
//! - Image content is a source path; the file is copied into the asset
//!   directory and the stored content becomes the relative asset path.
//! - Blocks are addressed by id, never by structural equality.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::assets::{store_image, AssetError};
use crate::model::block::{Block, BlockId, BlockKind};
use crate::model::document::NoteFile;
use crate::store::{DocumentStore, StoreError};
use crate::workspace::Workspace;

/// Result type used by block operations.
pub type BlockResult<T> = Result<T, BlockServiceError>;

/// Errors from block operations.
#[derive(Debug)]
pub enum BlockServiceError {
    /// Non-image content is blank after trimming.
    EmptyContent,
    /// Image block requested without a source path.
    MissingImageSource,
    /// Target folder does not exist.
    FolderNotFound(String),
    /// Target file does not exist in its folder.
    FileNotFound { folder: String, file: String },
    /// No block with this id exists in the file.
    BlockNotFound(BlockId),
    /// Asset intake failure for an image block.
    Asset(AssetError),
    /// Persistence failure; in-memory state is retained for retry.
    Store(StoreError),
}

impl Display for BlockServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content must not be blank"),
            Self::MissingImageSource => write!(f, "image block requires a source path"),
            Self::FolderNotFound(name) => write!(f, "folder not found: `{name}`"),
            Self::FileNotFound { folder, file } => {
                write!(f, "file not found: `{file}` in folder `{folder}`")
            }
            Self::BlockNotFound(id) => write!(f, "block not found: {id}"),
            Self::Asset(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BlockServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Asset(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AssetError> for BlockServiceError {
    fn from(value: AssetError) -> Self {
        Self::Asset(value)
    }
}

impl From<StoreError> for BlockServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Block operation facade over one workspace handle.
pub struct BlockService<'ws, S: DocumentStore> {
    ws: &'ws mut Workspace<S>,
}

impl<'ws, S: DocumentStore> BlockService<'ws, S> {
    /// Creates the service over a workspace.
    pub fn new(ws: &'ws mut Workspace<S>) -> Self {
        Self { ws }
    }

    /// Appends a block to the end of the file's sequence.
    ///
    /// For `BlockKind::Image`, `content` is the path of the source image to
    /// copy into the asset directory. Returns the id of the new block.
    pub fn add_block(
        &mut self,
        folder: &str,
        file: &str,
        kind: BlockKind,
        content: &str,
    ) -> BlockResult<BlockId> {
        let stored = self.prepare_content(kind, content)?;
        let block = Block::new(kind, stored);
        let id = block.id;

        let target = file_mut(self.ws, folder, file)?;
        target.blocks.push(block);
        self.ws.persist()?;
        info!(
            "event=block_add module=block status=ok folder={folder} file={file} kind={}",
            kind.as_str()
        );
        Ok(id)
    }

    /// Replaces a block's kind and content in place, keeping its identity.
    pub fn edit_block(
        &mut self,
        folder: &str,
        file: &str,
        id: BlockId,
        kind: BlockKind,
        content: &str,
    ) -> BlockResult<()> {
        let stored = self.prepare_content(kind, content)?;

        let target = file_mut(self.ws, folder, file)?;
        let block = target
            .blocks
            .iter_mut()
            .find(|block| block.id == id)
            .ok_or(BlockServiceError::BlockNotFound(id))?;
        block.kind = kind;
        block.content = stored;

        self.ws.persist()?;
        info!(
            "event=block_edit module=block status=ok folder={folder} file={file} kind={}",
            kind.as_str()
        );
        Ok(())
    }

    /// Removes a block by id, preserving the order of the rest.
    pub fn delete_block(&mut self, folder: &str, file: &str, id: BlockId) -> BlockResult<()> {
        let target = file_mut(self.ws, folder, file)?;
        let position = target
            .blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or(BlockServiceError::BlockNotFound(id))?;
        target.blocks.remove(position);

        self.ws.persist()?;
        info!("event=block_delete module=block status=ok folder={folder} file={file}");
        Ok(())
    }

    fn prepare_content(&self, kind: BlockKind, content: &str) -> BlockResult<String> {
        if kind.is_image() {
            let source = content.trim();
            if source.is_empty() {
                return Err(BlockServiceError::MissingImageSource);
            }
            let relative = store_image(self.ws.base_dir(), Path::new(source))?;
            return Ok(relative);
        }

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(BlockServiceError::EmptyContent);
        }
        Ok(trimmed.to_string())
    }
}

fn file_mut<'doc, S: DocumentStore>(
    ws: &'doc mut Workspace<S>,
    folder: &str,
    file: &str,
) -> BlockResult<&'doc mut NoteFile> {
    let target_folder = ws
        .document
        .folders
        .get_mut(folder)
        .ok_or_else(|| BlockServiceError::FolderNotFound(folder.to_string()))?;
    target_folder
        .files
        .get_mut(file)
        .ok_or_else(|| BlockServiceError::FileNotFound {
            folder: folder.to_string(),
            file: file.to_string(),
        })
}
