//! Domain model for the Blocpad document tree.
//!
//! # Responsibility
//! - Define the canonical folder/file/block structures persisted to disk.
//! - Keep wire-format tolerance (missing keys back-fill) inside the model.
//!
//! # Invariants
//! - Names are unique, case-sensitively, within their parent mapping.
//! - Block order within a file is significant and preserved.

pub mod block;
pub mod document;
