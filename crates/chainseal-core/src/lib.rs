//! Audit entry model, content hashing, and chain construction/verification.
//!
//! This crate provides:
//! - The audit log entry model with chain linkage fields
//! - Content and context hashing over canonical bytes
//! - The chain builder that assigns sequences and previous-entry hashes
//! - Offline verification of contiguous chain slices
//!
//! Core invariants:
//! - Entries are immutable, append-only evidence records
//! - Content hashes are domain-separated digests of a fixed, versioned
//!   field set; chain linkage never participates in its own hash
//! - Entry `n`'s `prev_hash` equals entry `n-1`'s content hash; sequences
//!   are strictly monotonic from 0
//! - Verification recomputes every hash from raw fields; stored hashes are
//!   never trusted
//!
#![deny(missing_docs)]

/// Chain construction: state cursor and entry builder.
pub mod builder;
/// Content and context hashing over the fixed field set.
pub mod content;
/// Audit entry model and chain linkage types.
pub mod entry;
/// Error types for chain operations.
pub mod errors;
/// Offline verification of chain slices.
pub mod verifier;

pub use builder::{ChainBuilder, ChainState};
pub use content::{
    compute_content_hash, compute_context_hash, recompute_content_hash, verify_context_hash,
    EntryContent, DEFAULT_CONTEXT_FIELDS,
};
pub use entry::{AuditLogEntry, ChainLink, ContextHash, EntryDraft, SCHEMA_VERSION};
pub use errors::ChainError;
pub use verifier::{
    verify_chain, verify_chain_link, verify_entry_content_hash, ChainFault, ChainVerification,
    ChainWindow, EntryCheck,
};
