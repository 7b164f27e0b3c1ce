//! Merkle trees over audit chain slices.
//!
//! This crate provides:
//! - Tree construction with one leaf per entry, in entry order
//! - O(log n) inclusion proofs with positioned siblings
//! - Batch verification that recomputes every leaf from raw entry fields
//! - Portable window commitments pairing a root with chain coordinates
//!
//! The combine rule is a compatibility contract: parent = digest of the two
//! child hex digests concatenated as text, odd nodes duplicated. Third-party
//! verifiers can check proofs with nothing but a hash function.
//!
#![deny(missing_docs)]

/// Batch verification against a committed root.
pub mod batch;
/// Window commitment records.
pub mod commitment;
/// Error types for Merkle operations.
pub mod errors;
/// Inclusion proofs and proof verification.
pub mod proof;
/// Tree construction and proof generation.
pub mod tree;

pub use batch::{verify_batch, BatchVerification};
pub use commitment::WindowCommitment;
pub use errors::MerkleError;
pub use proof::{verify_proof, MerkleProof, ProofStep, SiblingPosition};
pub use tree::MerkleTree;
