//! Search entry points over the in-memory document.
//!
//! # Responsibility
//! - Expose scoped and global substring search APIs.
//! - Keep result shaping inside core.

pub mod scan;
