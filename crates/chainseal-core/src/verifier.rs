//! Offline verification of chain slices.
//!
//! Verification is pure and deterministic: no clock, no store, no
//! configuration beyond the window the slice claims to occupy. Every stored
//! hash is recomputed from raw fields before it is believed.
//!
//! `verify_chain` stops at the first fault, which is the cheap answer for
//! "is this window intact". A full audit that keeps collecting findings past
//! the first fault lives in the verification service crate.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::content::recompute_content_hash;
use crate::entry::AuditLogEntry;
use crate::errors::ChainError;

/// Expected placement of a verified slice within its chain.
#[derive(Debug, Clone, Default)]
pub struct ChainWindow {
    /// Sequence the first slice element must carry.
    pub start_sequence: u64,
    /// Content hash the first element's `prev_hash` must equal. `None` at
    /// start 0 means the first element must have no `prev_hash` at all;
    /// `None` mid-chain skips the boundary check, which leaves the link
    /// into the window unverified and is the caller's risk to accept.
    pub expected_first_prev_hash: Option<String>,
}

impl ChainWindow {
    /// Window starting at the chain origin.
    pub fn from_origin() -> Self {
        Self::default()
    }

    /// Mid-chain window anchored at a known predecessor content hash.
    pub fn anchored(start_sequence: u64, expected_first_prev_hash: String) -> Self {
        Self {
            start_sequence,
            expected_first_prev_hash: Some(expected_first_prev_hash),
        }
    }

    /// Mid-chain window with no known anchor; the first element's link is
    /// not checked.
    pub fn unanchored(start_sequence: u64) -> Self {
        Self {
            start_sequence,
            expected_first_prev_hash: None,
        }
    }
}

/// First structural fault found in a chain slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainFault {
    /// Entry at a slice position does not carry the expected sequence.
    SequenceMismatch {
        /// Sequence the position demanded.
        expected: u64,
        /// Sequence the entry carried.
        found: u64,
    },
    /// Stored content hash does not match the recomputed hash.
    ContentHashMismatch {
        /// Sequence of the tampered entry.
        sequence: u64,
    },
    /// `prev_hash` does not match the predecessor's content hash.
    LinkBroken {
        /// Sequence of the entry whose link failed.
        sequence: u64,
    },
    /// First element's `prev_hash` violates the window boundary rule.
    FirstLinkInvalid {
        /// Sequence of the first element.
        sequence: u64,
    },
}

/// Outcome of verifying one entry in a slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCheck {
    /// Entry identifier.
    pub id: String,
    /// Entry sequence.
    pub sequence: u64,
    /// Whether the recomputed content hash matched the stored one.
    pub content_hash_valid: bool,
    /// Whether the link to the predecessor (or window anchor) held.
    pub link_valid: bool,
}

/// Result of verifying a contiguous chain slice.
#[derive(Debug, Clone)]
pub struct ChainVerification {
    /// Whether every check passed.
    pub valid: bool,
    /// Entries fully verified before the first fault (all of them when
    /// valid).
    pub entries_verified: usize,
    /// Sequence of the first faulty entry, when invalid.
    pub first_invalid_sequence: Option<u64>,
    /// The first fault found, when invalid.
    pub fault: Option<ChainFault>,
    /// Per-entry check outcomes, in slice order, up to and including the
    /// first faulty entry.
    pub checks: Vec<EntryCheck>,
    /// Wall-clock verification time.
    pub duration: Duration,
}

/// Verifies that an entry's stored content hash matches its content fields.
///
/// # Errors
///
/// Returns [`ChainError`] if the entry cannot be serialized for hashing.
pub fn verify_entry_content_hash(entry: &AuditLogEntry) -> Result<bool, ChainError> {
    let recomputed = recompute_content_hash(entry)?;
    Ok(recomputed == entry.chain.content_hash)
}

/// Verifies the hash link between an entry and its predecessor.
///
/// With a predecessor, `entry.prev_hash` must equal the predecessor's
/// stored content hash and the sequence must follow it directly. With no
/// predecessor the entry must be a chain origin: sequence 0, no
/// `prev_hash`.
pub fn verify_chain_link(entry: &AuditLogEntry, previous: Option<&AuditLogEntry>) -> bool {
    match previous {
        Some(prev) => {
            entry.chain.sequence == prev.chain.sequence + 1
                && entry.chain.prev_hash.as_deref() == Some(prev.chain.content_hash.as_str())
        }
        None => entry.chain.sequence == 0 && entry.chain.prev_hash.is_none(),
    }
}

/// Verifies a contiguous, ascending chain slice against its window.
///
/// For each element, in order: the position must carry the expected
/// sequence (`start_sequence + index`), the recomputed content hash must
/// match the stored one, and the link to the predecessor (or the window
/// anchor for the first element) must hold. Verification stops at the first
/// fault. An empty slice is valid.
///
/// # Errors
///
/// Returns [`ChainError`] only for structural failures (an entry that
/// cannot be serialized). A tampered chain is a non-error result with
/// `valid == false`.
pub fn verify_chain(
    entries: &[AuditLogEntry],
    window: &ChainWindow,
) -> Result<ChainVerification, ChainError> {
    let started = Instant::now();
    let mut checks: Vec<EntryCheck> = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let expected_sequence = window.start_sequence + i as u64;
        if entry.chain.sequence != expected_sequence {
            return Ok(invalid(
                checks,
                i,
                entry.chain.sequence,
                ChainFault::SequenceMismatch {
                    expected: expected_sequence,
                    found: entry.chain.sequence,
                },
                started,
            ));
        }

        let content_hash_valid = verify_entry_content_hash(entry)?;
        if !content_hash_valid {
            checks.push(EntryCheck {
                id: entry.id.clone(),
                sequence: entry.chain.sequence,
                content_hash_valid: false,
                link_valid: false,
            });
            return Ok(invalid(
                checks,
                i,
                entry.chain.sequence,
                ChainFault::ContentHashMismatch {
                    sequence: entry.chain.sequence,
                },
                started,
            ));
        }

        let link_valid = if i == 0 {
            first_link_valid(entry, window)
        } else {
            verify_chain_link(entry, Some(&entries[i - 1]))
        };
        if !link_valid {
            checks.push(EntryCheck {
                id: entry.id.clone(),
                sequence: entry.chain.sequence,
                content_hash_valid: true,
                link_valid: false,
            });
            let fault = if i == 0 {
                ChainFault::FirstLinkInvalid {
                    sequence: entry.chain.sequence,
                }
            } else {
                ChainFault::LinkBroken {
                    sequence: entry.chain.sequence,
                }
            };
            return Ok(invalid(checks, i, entry.chain.sequence, fault, started));
        }

        checks.push(EntryCheck {
            id: entry.id.clone(),
            sequence: entry.chain.sequence,
            content_hash_valid: true,
            link_valid: true,
        });
    }

    Ok(ChainVerification {
        valid: true,
        entries_verified: entries.len(),
        first_invalid_sequence: None,
        fault: None,
        checks,
        duration: started.elapsed(),
    })
}

fn first_link_valid(entry: &AuditLogEntry, window: &ChainWindow) -> bool {
    match (&window.expected_first_prev_hash, window.start_sequence) {
        (Some(anchor), _) => entry.chain.prev_hash.as_deref() == Some(anchor.as_str()),
        (None, 0) => entry.chain.prev_hash.is_none(),
        (None, _) => true,
    }
}

fn invalid(
    checks: Vec<EntryCheck>,
    verified: usize,
    sequence: u64,
    fault: ChainFault,
    started: Instant,
) -> ChainVerification {
    ChainVerification {
        valid: false,
        entries_verified: verified,
        first_invalid_sequence: Some(sequence),
        fault: Some(fault),
        checks,
        duration: started.elapsed(),
    }
}
