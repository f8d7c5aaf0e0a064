//! Image asset intake for image blocks.
//!
//! # Responsibility
//! - Copy user-chosen image files into the workspace asset directory.
//! - Generate collision-free, timestamp-derived asset names.
//!
//! # Invariants
//! - Stored paths are relative to the document's directory and use `/`
//!   separators.
//! - The source file is copied, never moved.

use chrono::Local;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Asset subdirectory (relative to the document directory) for images.
pub const IMAGE_ASSET_DIR: &str = "assets/images";

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors from asset intake.
#[derive(Debug)]
pub enum AssetError {
    /// Source path does not point at a readable file.
    MissingSource(PathBuf),
    /// Filesystem failure while creating or copying the asset.
    Io(std::io::Error),
}

impl Display for AssetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSource(path) => {
                write!(f, "image source not found: {}", path.display())
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AssetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingSource(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Copies `source` into the image asset directory under `base_dir`.
///
/// The asset name is the current timestamp in milliseconds plus the source
/// extension, disambiguated with a numeric suffix when taken. Returns the
/// stored relative path.
pub fn store_image(base_dir: &Path, source: &Path) -> AssetResult<String> {
    if !source.is_file() {
        return Err(AssetError::MissingSource(source.to_path_buf()));
    }

    let asset_dir = base_dir.join("assets").join("images");
    fs::create_dir_all(&asset_dir)?;

    let stem = Local::now().timestamp_millis().to_string();
    let extension = source
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut file_name = format!("{stem}{extension}");
    let mut attempt = 1u32;
    while asset_dir.join(&file_name).exists() {
        file_name = format!("{stem}_{attempt}{extension}");
        attempt += 1;
    }

    fs::copy(source, asset_dir.join(&file_name))?;
    Ok(format!("{IMAGE_ASSET_DIR}/{file_name}"))
}
