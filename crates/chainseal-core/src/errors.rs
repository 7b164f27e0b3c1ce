use thiserror::Error;

/// Chain construction and verification errors.
///
/// These are structural failures only. A tampered or inconsistent chain is
/// never an error: verification reports it as a non-error result.
#[derive(Error, Debug)]
pub enum ChainError {
    /// Entry serialization failed.
    #[error("entry serialization failed: {0}")]
    Serialization(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonical(#[from] chainseal_canonical::CanonicalError),
}
