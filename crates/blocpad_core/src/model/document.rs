//! Document tree model: metadata, folders, and files.
//!
//! # Responsibility
//! - Define the persisted document shape and its construction defaults.
//! - Provide timestamp generation/parsing shared across the crate.
//!
//! # Invariants
//! - `folders`/`files` are `BTreeMap`s: mapping iteration order is the
//!   explicit, deterministic name order, never container-incidental.
//! - `created` timestamps drive the newest-first display sort only; they
//!   carry no correctness weight.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::block::Block;

/// Application name recorded in document metadata.
pub const APP_NAME: &str = "Blocpad";

/// Document format version recorded in metadata.
pub const FORMAT_VERSION: &str = "1.0";

/// Returns the current local time as an ISO-8601 string.
pub fn now_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Parses a stored timestamp leniently.
///
/// Unparseable or missing values sort as the UNIX epoch so malformed
/// documents still render in a stable order.
pub fn parse_timestamp(value: &str) -> NaiveDateTime {
    value.parse().unwrap_or(NaiveDateTime::UNIX_EPOCH)
}

/// Workspace metadata header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Application name that wrote the document.
    #[serde(default = "default_app_name")]
    pub app: String,
    /// Document format version.
    #[serde(default = "default_format_version")]
    pub version: String,
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created: String,
    /// ISO-8601 timestamp of the latest persisted mutation.
    #[serde(default)]
    pub last_modified: String,
}

fn default_app_name() -> String {
    APP_NAME.to_string()
}

fn default_format_version() -> String {
    FORMAT_VERSION.to_string()
}

impl Default for Meta {
    /// Fresh metadata with both timestamps set to now.
    fn default() -> Self {
        let now = now_timestamp();
        Self {
            app: APP_NAME.to_string(),
            version: FORMAT_VERSION.to_string(),
            created: now.clone(),
            last_modified: now,
        }
    }
}

/// The whole persisted workspace: metadata plus every folder.
///
/// Missing `meta`/`folders` keys back-fill on load so partially-formed
/// documents remain usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub folders: BTreeMap<String, Folder>,
}

impl Document {
    /// Creates an empty document with fresh metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folders sorted newest-first with name tie-break, for display.
    pub fn folders_by_recency(&self) -> Vec<(&str, &Folder)> {
        let mut entries: Vec<(&str, &Folder)> = self
            .folders
            .iter()
            .map(|(name, folder)| (name.as_str(), folder))
            .collect();
        entries.sort_by(|a, b| {
            parse_timestamp(&b.1.created)
                .cmp(&parse_timestamp(&a.1.created))
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// Total file count across all folders, for status reporting.
    pub fn file_count(&self) -> usize {
        self.folders.values().map(|folder| folder.files.len()).sum()
    }
}

/// One named group of files, owned exclusively by the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created: String,
    /// Files keyed by unique (case-sensitive) name.
    #[serde(default)]
    pub files: BTreeMap<String, NoteFile>,
}

impl Folder {
    /// Creates an empty folder stamped now.
    pub fn new() -> Self {
        Self {
            created: now_timestamp(),
            files: BTreeMap::new(),
        }
    }

    /// Files sorted newest-first with name tie-break, for display.
    pub fn files_by_recency(&self) -> Vec<(&str, &NoteFile)> {
        let mut entries: Vec<(&str, &NoteFile)> = self
            .files
            .iter()
            .map(|(name, file)| (name.as_str(), file))
            .collect();
        entries.sort_by(|a, b| {
            parse_timestamp(&b.1.created)
                .cmp(&parse_timestamp(&a.1.created))
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}

/// One note file: an ordered sequence of content blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFile {
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created: String,
    /// Blocks in display and insertion order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl NoteFile {
    /// Creates an empty file stamped now.
    pub fn new() -> Self {
        Self {
            created: now_timestamp(),
            blocks: Vec::new(),
        }
    }
}
