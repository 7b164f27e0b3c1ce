//! Tree construction and proof generation.

use std::collections::HashMap;

use chainseal_canonical::HashAlgorithm;
use chainseal_core::AuditLogEntry;
use tracing::debug;

use crate::errors::MerkleError;
use crate::proof::{MerkleProof, ProofStep, SiblingPosition};

/// Merkle tree over a slice of chain entries.
///
/// Leaves are the entries' stored content hashes, one per entry in the
/// given order; the order is part of the commitment and is never re-sorted
/// here. All levels are retained, so proof generation walks one index per
/// level instead of re-deriving subtrees.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `levels[0]` holds the leaves; the last level holds the root.
    levels: Vec<Vec<String>>,
    /// Entry id to leaf position.
    leaf_index: HashMap<String, usize>,
    algorithm: HashAlgorithm,
}

impl MerkleTree {
    /// Builds a tree over `entries` in the given order.
    ///
    /// The algorithm is taken from the first entry's chain link (SHA-256
    /// for an empty tree). Pairs combine left-to-right; an odd node at any
    /// level is combined with a duplicate of itself, never dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::DuplicateEntryId`] when two entries share an
    /// id; inclusion proofs are looked up by id and must be unambiguous.
    pub fn build(entries: &[AuditLogEntry]) -> Result<Self, MerkleError> {
        let algorithm = entries
            .first()
            .map(|e| e.chain.algorithm)
            .unwrap_or_default();

        let mut leaf_index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if leaf_index.insert(entry.id.clone(), i).is_some() {
                return Err(MerkleError::DuplicateEntryId(entry.id.clone()));
            }
        }

        let leaves: Vec<String> = entries
            .iter()
            .map(|e| e.chain.content_hash.clone())
            .collect();
        debug!(leaves = leaves.len(), %algorithm, "building merkle tree");
        let levels = build_levels(algorithm, leaves);

        Ok(Self {
            levels,
            leaf_index,
            algorithm,
        })
    }

    /// Root hash, or `None` for an empty tree.
    pub fn root_hash(&self) -> Option<&str> {
        self.levels
            .last()
            .and_then(|level| level.first())
            .map(String::as_str)
    }

    /// Combine algorithm for this tree.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels.first().map(Vec::len).unwrap_or(0)
    }

    /// Whether the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inclusion proof for the entry with `entry_id`, or `None` when no
    /// such entry was in the batch.
    ///
    /// Siblings are ordered leaf to root; an odd node's sibling is its own
    /// hash on the right, mirroring construction.
    pub fn proof(&self, entry_id: &str) -> Option<MerkleProof> {
        let mut index = *self.leaf_index.get(entry_id)?;
        let leaf_hash = self.levels.first()?.get(index)?.clone();
        let root_hash = self.root_hash()?.to_string();

        let mut siblings = Vec::with_capacity(self.levels.len());
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = index ^ 1;
            let step = match level.get(sibling_index) {
                Some(hash) if sibling_index < index => ProofStep {
                    hash: hash.clone(),
                    position: SiblingPosition::Left,
                },
                Some(hash) => ProofStep {
                    hash: hash.clone(),
                    position: SiblingPosition::Right,
                },
                // Odd tail node: duplicated as its own right sibling.
                None => ProofStep {
                    hash: level[index].clone(),
                    position: SiblingPosition::Right,
                },
            };
            siblings.push(step);
            index /= 2;
        }

        Some(MerkleProof {
            entry_id: entry_id.to_string(),
            leaf_hash,
            siblings,
            root_hash,
            algorithm: self.algorithm,
        })
    }
}

/// Parent hash of two child hex digests: digest over their textual
/// concatenation. Deliberately domain-free; the rule is an interchange
/// contract with external verifiers.
pub(crate) fn combine(algorithm: HashAlgorithm, left: &str, right: &str) -> String {
    let mut data = String::with_capacity(left.len() + right.len());
    data.push_str(left);
    data.push_str(right);
    algorithm.digest_hex(data.as_bytes())
}

/// Folds leaves upward level by level until one root remains.
pub(crate) fn build_levels(algorithm: HashAlgorithm, leaves: Vec<String>) -> Vec<Vec<String>> {
    let mut levels = Vec::new();
    let mut current = leaves;
    while current.len() > 1 {
        let mut next = Vec::with_capacity((current.len() + 1) / 2);
        for pair in current.chunks(2) {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            next.push(combine(algorithm, left, right));
        }
        levels.push(current);
        current = next;
    }
    levels.push(current);
    levels
}

/// Root over bare leaf hashes, or `None` when there are none.
pub(crate) fn root_from_leaves(algorithm: HashAlgorithm, leaves: Vec<String>) -> Option<String> {
    if leaves.is_empty() {
        return None;
    }
    build_levels(algorithm, leaves)
        .pop()
        .and_then(|level| level.into_iter().next())
}
