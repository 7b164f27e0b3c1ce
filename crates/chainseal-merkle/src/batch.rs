//! Batch verification against a committed root.

use chainseal_core::{recompute_content_hash, verify_chain, AuditLogEntry, ChainWindow};
use tracing::debug;

use crate::errors::MerkleError;
use crate::tree::root_from_leaves;

/// Result of verifying a batch against a committed root.
#[derive(Debug, Clone)]
pub struct BatchVerification {
    /// Whether the batch is fully intact: chain checks passed and the
    /// recomputed root matches the committed one.
    pub valid: bool,
    /// Whether the slice's own chain checks passed.
    pub chain_valid: bool,
    /// Whether the root recomputed from raw fields matches the expected
    /// root.
    pub root_matches: bool,
    /// Root recomputed from raw entry fields (`None` for an empty batch).
    pub computed_root: Option<String>,
    /// Chain verification detail for the slice.
    pub chain: chainseal_core::ChainVerification,
}

/// Verifies a batch of entries against a committed root.
///
/// Two independent checks, both recomputing rather than trusting:
///
/// 1. The slice must verify as a chain window (sequences, content hashes,
///    links). The window is derived from the first entry's sequence; a
///    window not starting at 0 is taken as unanchored.
/// 2. Every leaf is recomputed from raw entry fields, the tree is rebuilt
///    over those leaves, and the resulting root must equal `expected_root`.
///
/// Check 2 does not read `chain.content_hash` at all, so an attacker who
/// rewrote an entry and consistently updated its stored hash and the
/// successor links still fails against an independently held root.
///
/// An empty batch cannot reproduce any root and is reported invalid.
///
/// # Errors
///
/// Returns [`MerkleError`] when an entry cannot be serialized for hashing;
/// a tampered batch is a non-error result with `valid == false`.
pub fn verify_batch(
    entries: &[AuditLogEntry],
    expected_root: &str,
) -> Result<BatchVerification, MerkleError> {
    let window = match entries.first() {
        Some(first) if first.chain.sequence > 0 => ChainWindow::unanchored(first.chain.sequence),
        _ => ChainWindow::from_origin(),
    };
    let chain = verify_chain(entries, &window)?;

    let algorithm = entries
        .first()
        .map(|e| e.chain.algorithm)
        .unwrap_or_default();
    let mut leaves = Vec::with_capacity(entries.len());
    for entry in entries {
        leaves.push(recompute_content_hash(entry)?);
    }
    let computed_root = root_from_leaves(algorithm, leaves);

    let root_matches = computed_root.as_deref() == Some(expected_root);
    let valid = chain.valid && root_matches;
    debug!(
        entries = entries.len(),
        chain_valid = chain.valid,
        root_matches,
        "verified batch against committed root"
    );

    Ok(BatchVerification {
        valid,
        chain_valid: chain.valid,
        root_matches,
        computed_root,
        chain,
    })
}
