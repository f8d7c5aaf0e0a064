//! Linear substring scans over folders, files, and blocks.
//!
//! # Responsibility
//! - Global search: every file whose name or block content matches.
//! - Scoped search: first matching block within one open file.
//!
//! # Invariants
//! - Matching is case-insensitive substring containment.
//! - Blank queries return nothing; the caller restores the browse view.
//! - Global result order is the document's deterministic mapping order,
//!   folder then file.

use crate::model::block::{Block, BlockId, BlockKind};
use crate::model::document::{parse_timestamp, Document, Folder, NoteFile};

/// Maximum characters carried into a result snippet.
const SNIPPET_CHARS: usize = 40;

/// The block that satisfied a global search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// Id of the first matching block, for scroll-to-highlight.
    pub id: BlockId,
    /// Kind of the matching block.
    pub kind: BlockKind,
    /// Leading characters of the matching content.
    pub snippet: String,
}

/// One file-level result from a global search.
///
/// `block` is `None` when the file matched on its name alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Folder containing the matching file.
    pub folder: String,
    /// Name of the matching file.
    pub file: String,
    /// First matching block, when content matched.
    pub block: Option<BlockMatch>,
}

/// Searches the whole document.
///
/// A file matches when the query is a case-insensitive substring of its
/// name or of any block's content; the first matching block is attached.
/// Each file appears at most once.
pub fn search_document(document: &Document, query: &str) -> Vec<SearchHit> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    for (folder_name, folder) in &document.folders {
        for (file_name, file) in &folder.files {
            if file_name.to_lowercase().contains(&needle) {
                hits.push(SearchHit {
                    folder: folder_name.clone(),
                    file: file_name.clone(),
                    block: None,
                });
                continue;
            }

            if let Some(block) = first_matching_block(file, &needle) {
                hits.push(SearchHit {
                    folder: folder_name.clone(),
                    file: file_name.clone(),
                    block: Some(BlockMatch {
                        id: block.id,
                        kind: block.kind,
                        snippet: snippet_of(&block.content),
                    }),
                });
            }
        }
    }
    hits
}

/// Returns the first block in `file` whose content contains the query.
///
/// A fresh query restarts the scan; repeat matches are not enumerated.
pub fn search_file<'doc>(file: &'doc NoteFile, query: &str) -> Option<&'doc Block> {
    let needle = normalize_query(query)?;
    first_matching_block(file, &needle)
}

/// File names in `folder` containing the query, newest first.
///
/// A blank query returns every file, matching the browse view.
pub fn filter_files<'doc>(folder: &'doc Folder, query: &str) -> Vec<&'doc str> {
    let needle = normalize_query(query).unwrap_or_default();
    let mut names: Vec<(&str, &str)> = folder
        .files
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&needle))
        .map(|(name, file)| (name.as_str(), file.created.as_str()))
        .collect();
    names.sort_by(|a, b| {
        parse_timestamp(b.1)
            .cmp(&parse_timestamp(a.1))
            .then_with(|| a.0.cmp(b.0))
    });
    names.into_iter().map(|(name, _)| name).collect()
}

fn first_matching_block<'doc>(file: &'doc NoteFile, needle: &str) -> Option<&'doc Block> {
    file.blocks
        .iter()
        .find(|block| block.content.to_lowercase().contains(needle))
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

fn snippet_of(content: &str) -> String {
    content.chars().take(SNIPPET_CHARS).collect()
}
