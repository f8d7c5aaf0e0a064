//! Document persistence bootstrap and contracts.
//!
//! # Responsibility
//! - Define the persistence seam used by workspace and service layers.
//! - Resolve the default on-disk workspace location.
//!
//! # Invariants
//! - The whole document is rewritten on every save; there is no partial
//!   update path.
//! - Load tolerates missing `meta`/`folders` keys via model defaults.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::model::document::Document;

mod json_store;

pub use json_store::JsonDocumentStore;

/// Custom extension used by workspace and share files.
pub const DOCUMENT_EXTENSION: &str = "bpad";

/// Directory name holding the default workspace file.
pub const DEFAULT_DIR_NAME: &str = "Blocpad";

/// File name of the default workspace document.
pub const DEFAULT_FILE_NAME: &str = "Blocpad_Data.bpad";

/// Result type used by document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from document persistence.
///
/// All variants are surfaced to the user and are non-fatal: callers keep
/// their last good in-memory state and may retry.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure while reading or writing the document.
    Io(std::io::Error),
    /// Document bytes are not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// Document parsed but violates the expected structure.
    InvalidDocument(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::InvalidDocument(message) => write!(f, "invalid document: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidDocument(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Persistence contract for one workspace document.
///
/// The store knows nothing about tree semantics; it moves whole documents
/// between memory and disk.
pub trait DocumentStore {
    /// Creates an empty document at the backing location when absent.
    ///
    /// Idempotent: an existing document is never touched.
    fn ensure_default(&self) -> StoreResult<()>;

    /// Reads and parses the backing document.
    fn load(&self) -> StoreResult<Document>;

    /// Stamps `meta.last_modified` and rewrites the whole document.
    ///
    /// The write is direct, not temp-file-then-rename: an interrupted save
    /// can leave the on-disk document truncated. In-memory state is kept by
    /// the caller so the user can retry.
    fn save(&self, document: &mut Document) -> StoreResult<()>;

    /// Path of the backing document file.
    fn location(&self) -> &Path;

    /// Directory containing the document; asset paths are relative to it.
    fn base_dir(&self) -> &Path;
}

/// Default workspace file path: `<Documents>/Blocpad/Blocpad_Data.bpad`.
///
/// Falls back to the home directory, then the current directory, when the
/// platform reports no Documents folder.
pub fn default_document_path() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
        .join(DEFAULT_FILE_NAME)
}
