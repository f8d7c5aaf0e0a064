//! Core domain logic for Blocpad, a block-based programmer's notebook.
//! This crate is the single source of truth for document invariants;
//! presentation layers stay thin over it.

pub mod assets;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;
pub mod workspace;

pub use assets::{store_image, AssetError, AssetResult, IMAGE_ASSET_DIR};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::block::{Block, BlockId, BlockKind};
pub use model::document::{Document, Folder, Meta, NoteFile, APP_NAME, FORMAT_VERSION};
pub use search::scan::{filter_files, search_document, search_file, BlockMatch, SearchHit};
pub use service::block_service::{BlockResult, BlockService, BlockServiceError};
pub use service::share_service::{
    Imported, SharePayload, ShareResult, ShareService, ShareServiceError,
};
pub use service::tree_service::{TreeResult, TreeService, TreeServiceError};
pub use store::{
    default_document_path, DocumentStore, JsonDocumentStore, StoreError, StoreResult,
    DOCUMENT_EXTENSION,
};
pub use workspace::{Selection, Workspace};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
