//! Pluggable storage abstraction for audit chain entries.
//!
//! This crate provides:
//! - `LogStore` and `LogAppender` traits, the seam between verification and
//!   whatever persists the chain in production
//! - An in-memory reference backend for tests and tooling
//! - JSONL file helpers, the interchange format used by the CLI
//!
//! The real production store is an external collaborator. Implementations
//! surface their own failures as [`StoreError`]; a store failure is never
//! evidence about chain integrity and is never reinterpreted as such.
//!
#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// JSONL file helpers.
pub mod jsonl;
/// In-memory reference backend.
pub mod memory;
/// Storage backend traits.
pub mod traits;

pub use error::StoreError;
pub use jsonl::{read_drafts, read_entries, JsonlWriter};
pub use memory::MemoryStore;
pub use traits::{EntryQuery, LogAppender, LogStore, StoreMetadata};
