use thiserror::Error;

/// Merkle construction and verification errors.
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Two entries in the batch share an id, making proofs ambiguous.
    #[error("duplicate entry id in batch: {0}")]
    DuplicateEntryId(String),
    /// A commitment cannot cover an empty window.
    #[error("window is empty")]
    EmptyWindow,
    /// Content hashing failed while recomputing leaves.
    #[error("content hashing failed: {0}")]
    Chain(#[from] chainseal_core::ChainError),
}
