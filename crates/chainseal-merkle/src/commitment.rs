//! Window commitment records.

use chainseal_canonical::HashAlgorithm;
use chainseal_core::AuditLogEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::MerkleError;
use crate::tree::MerkleTree;

/// Portable commitment to a contiguous window of a chain.
///
/// Pairs the Merkle root over the window with the chain coordinates needed
/// to anchor it later: the sequence range and the content hash of the
/// window's last entry. Publishing a commitment (or handing it to an
/// auditor) is what gives [`verify_batch`](crate::verify_batch) an
/// independently held root to check against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowCommitment {
    /// First sequence in the window.
    pub start_sequence: u64,
    /// Last sequence in the window.
    pub end_sequence: u64,
    /// Number of entries committed.
    pub entry_count: usize,
    /// Merkle root over the window's content hashes.
    pub root_hash: String,
    /// Combine algorithm.
    pub algorithm: HashAlgorithm,
    /// Content hash of the window's last entry.
    pub head_content_hash: String,
    /// When the commitment was computed.
    pub computed_at: DateTime<Utc>,
}

impl WindowCommitment {
    /// Commits to a non-empty window of entries, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::EmptyWindow`] for an empty slice and
    /// [`MerkleError::DuplicateEntryId`] when entry ids collide.
    pub fn over(entries: &[AuditLogEntry]) -> Result<Self, MerkleError> {
        let (first, last) = match (entries.first(), entries.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(MerkleError::EmptyWindow),
        };

        let tree = MerkleTree::build(entries)?;
        let root_hash = tree
            .root_hash()
            .ok_or(MerkleError::EmptyWindow)?
            .to_string();

        Ok(Self {
            start_sequence: first.chain.sequence,
            end_sequence: last.chain.sequence,
            entry_count: entries.len(),
            root_hash,
            algorithm: tree.algorithm(),
            head_content_hash: last.chain.content_hash.clone(),
            computed_at: Utc::now(),
        })
    }
}
