//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate document mutations into user-facing operations.
//! - Keep the presentation layer decoupled from tree and persistence
//!   details.
//!
//! # Invariants
//! - Every mutating operation persists synchronously before reporting
//!   success; a failed persist keeps the in-memory change so the save can
//!   be retried.

pub mod block_service;
pub mod share_service;
pub mod tree_service;
