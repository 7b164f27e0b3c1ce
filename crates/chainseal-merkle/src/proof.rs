//! Inclusion proofs and proof verification.

use chainseal_canonical::HashAlgorithm;
use serde::{Deserialize, Serialize};

use crate::tree::combine;

/// Side a sibling hash joins on during proof folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingPosition {
    /// Sibling is the left operand of the combine.
    Left,
    /// Sibling is the right operand of the combine.
    Right,
}

/// One step of an inclusion proof: a sibling hash and the side it joins on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofStep {
    /// Sibling hash at this level.
    pub hash: String,
    /// Side the sibling joins on.
    pub position: SiblingPosition,
}

/// Inclusion proof for one entry, siblings ordered leaf to root.
///
/// A third party holding only the committed root can confirm the entry was
/// in the batch without seeing any other entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleProof {
    /// Entry the proof covers.
    pub entry_id: String,
    /// The entry's leaf hash (its stored content hash).
    pub leaf_hash: String,
    /// Sibling steps from the leaf level upward.
    pub siblings: Vec<ProofStep>,
    /// Root the fold must reach.
    pub root_hash: String,
    /// Combine algorithm. Carried so proofs stay self-describing across
    /// algorithm migrations; verifiers that pin one algorithm may ignore it.
    pub algorithm: HashAlgorithm,
}

/// Verifies an inclusion proof.
///
/// Folds the leaf hash with each sibling in order, prepending `Left`
/// siblings and appending `Right` ones, and compares the result against the
/// proof's root. Any altered sibling, flipped position, or reordered step
/// makes the fold land elsewhere.
pub fn verify_proof(proof: &MerkleProof) -> bool {
    let mut acc = proof.leaf_hash.clone();
    for step in &proof.siblings {
        acc = match step.position {
            SiblingPosition::Left => combine(proof.algorithm, &step.hash, &acc),
            SiblingPosition::Right => combine(proof.algorithm, &acc, &step.hash),
        };
    }
    acc == proof.root_hash
}

impl MerkleProof {
    /// Verifies this proof. See [`verify_proof`].
    pub fn verify(&self) -> bool {
        verify_proof(self)
    }

    /// Number of sibling steps (tree depth above the leaf).
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }
}
