//! Pure audit checks over one queried window.
//!
//! Every function takes entries sorted ascending by sequence and returns
//! findings; nothing here touches a store or a clock. Unlike
//! [`chainseal_core::verify_chain`], the audit pass does not stop at the
//! first fault, so one pass over a window surfaces every finding at once.

use chainseal_canonical::HashAlgorithm;
use chainseal_core::{
    verify_entry_content_hash, AuditLogEntry, ChainError, ChainWindow, EntryCheck,
};

use crate::issue::{IntegrityIssue, IssueDetail};

/// Outcome of the cryptographic audit pass over one window.
#[derive(Debug, Clone)]
pub struct WindowAudit {
    /// Findings, in window order, not yet severity-sorted.
    pub issues: Vec<IntegrityIssue>,
    /// Per-entry check outcomes, in window order.
    pub checks: Vec<EntryCheck>,
    /// Entries whose recomputed content hash matched the stored one.
    pub hashes_verified: u64,
}

/// Audits every entry in the window: content hashes, pairwise links, and
/// the first-entry boundary rule.
///
/// Content hashes are recomputed from raw fields; stored hashes are never
/// trusted. Link checks compare hashes only, since sequence continuity is
/// [`detect_sequence_gaps`]'s concern. The boundary rule applies only when
/// the first entry actually carries the window's start sequence: an
/// anchored window checks the first `prev_hash` against the anchor, a
/// window starting at sequence 0 requires the `prev_hash` to be absent,
/// and an unanchored mid-chain window gets no boundary check at all.
///
/// # Errors
///
/// Returns [`ChainError`] if an entry cannot be serialized for hashing.
pub fn audit_window(
    entries: &[AuditLogEntry],
    window: &ChainWindow,
) -> Result<WindowAudit, ChainError> {
    let mut issues = Vec::new();
    let mut checks = Vec::with_capacity(entries.len());
    let mut hashes_verified = 0u64;

    for (i, entry) in entries.iter().enumerate() {
        let content_hash_valid = verify_entry_content_hash(entry)?;
        if content_hash_valid {
            hashes_verified += 1;
        } else {
            issues.push(IntegrityIssue::new(IssueDetail::ContentHashMismatch {
                sequence: entry.chain.sequence,
                entry_id: entry.id.clone(),
            }));
        }

        let link_valid = if i == 0 {
            match boundary_check(entry, window) {
                Some(false) => {
                    issues.push(IntegrityIssue::new(IssueDetail::FirstEntryInvalid {
                        sequence: entry.chain.sequence,
                        entry_id: entry.id.clone(),
                    }));
                    false
                }
                Some(true) | None => true,
            }
        } else {
            let intact = link_intact(entry, &entries[i - 1]);
            if !intact {
                issues.push(IntegrityIssue::new(IssueDetail::ChainLinkBroken {
                    sequence: entry.chain.sequence,
                    entry_id: entry.id.clone(),
                }));
            }
            intact
        };

        checks.push(EntryCheck {
            id: entry.id.clone(),
            sequence: entry.chain.sequence,
            content_hash_valid,
            link_valid,
        });
    }

    Ok(WindowAudit {
        issues,
        checks,
        hashes_verified,
    })
}

/// Finds contiguous ranges of missing sequences.
///
/// Compares consecutive deltas plus the delta between `expected_start` and
/// the first entry. One finding covers one whole missing range, never one
/// per missing number. Duplicate sequences produce no gap, and an empty
/// window has none to report.
pub fn detect_sequence_gaps(
    entries: &[AuditLogEntry],
    expected_start: u64,
) -> Vec<IntegrityIssue> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    if first.chain.sequence > expected_start {
        issues.push(gap_issue(expected_start, first.chain.sequence - 1));
    }
    for pair in entries.windows(2) {
        if pair[1].chain.sequence > pair[0].chain.sequence + 1 {
            issues.push(gap_issue(
                pair[0].chain.sequence + 1,
                pair[1].chain.sequence - 1,
            ));
        }
    }
    issues
}

/// Finds sequences claimed by more than one entry.
///
/// One finding per duplicated sequence, naming every entry in the group in
/// window order.
pub fn detect_duplicate_sequences(entries: &[AuditLogEntry]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let mut i = 0;
    while i < entries.len() {
        let sequence = entries[i].chain.sequence;
        let mut j = i + 1;
        while j < entries.len() && entries[j].chain.sequence == sequence {
            j += 1;
        }
        if j - i > 1 {
            issues.push(IntegrityIssue::new(IssueDetail::SequenceDuplicate {
                sequence,
                entry_ids: entries[i..j].iter().map(|e| e.id.clone()).collect(),
            }));
        }
        i = j;
    }
    issues
}

/// Flags entries whose timestamp is strictly earlier than their immediate
/// predecessor's. Equal timestamps are not flagged.
pub fn verify_timestamp_order(entries: &[AuditLogEntry]) -> Vec<IntegrityIssue> {
    entries
        .windows(2)
        .filter(|pair| pair[1].timestamp < pair[0].timestamp)
        .map(|pair| {
            IntegrityIssue::new(IssueDetail::TimestampRegression {
                sequence: pair[1].chain.sequence,
                entry_id: pair[1].id.clone(),
                timestamp: pair[1].timestamp,
                previous_timestamp: pair[0].timestamp,
            })
        })
        .collect()
}

/// Reports a window spanning more than one hash algorithm.
///
/// Each entry still verifies under its own recorded algorithm, and mixed
/// algorithms are legitimate mid-rotation, so the finding is low severity.
pub fn check_algorithm_consistency(entries: &[AuditLogEntry]) -> Option<IntegrityIssue> {
    let mut seen: Vec<HashAlgorithm> = Vec::new();
    for entry in entries {
        if !seen.contains(&entry.chain.algorithm) {
            seen.push(entry.chain.algorithm);
        }
    }
    if seen.len() > 1 {
        Some(IntegrityIssue::new(IssueDetail::AlgorithmMismatch {
            algorithms: seen.iter().map(|a| a.name().to_string()).collect(),
        }))
    } else {
        None
    }
}

fn gap_issue(missing_start: u64, missing_end: u64) -> IntegrityIssue {
    IntegrityIssue::new(IssueDetail::SequenceGap {
        missing_start,
        missing_end,
        missing_count: missing_end - missing_start + 1,
    })
}

/// `Some(valid)` when the boundary rule applies to the first entry, `None`
/// when it cannot be checked. A first entry that does not carry the
/// window's start sequence is the gap detector's finding, not a boundary
/// violation.
fn boundary_check(first: &AuditLogEntry, window: &ChainWindow) -> Option<bool> {
    if first.chain.sequence != window.start_sequence {
        return None;
    }
    match &window.expected_first_prev_hash {
        Some(anchor) => Some(first.chain.prev_hash.as_deref() == Some(anchor.as_str())),
        None if window.start_sequence == 0 => Some(first.chain.prev_hash.is_none()),
        None => None,
    }
}

fn link_intact(entry: &AuditLogEntry, previous: &AuditLogEntry) -> bool {
    entry.chain.prev_hash.as_deref() == Some(previous.chain.content_hash.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainseal_core::{ChainBuilder, EntryDraft};
    use serde_json::Map;

    fn make_draft(id: &str) -> EntryDraft {
        EntryDraft {
            id: id.into(),
            schema_version: 1,
            timestamp: "2026-02-10T08:00:00Z".parse().unwrap(),
            actor: "user:cora".into(),
            action: "document.sign".into(),
            resource: "doc:contract-88".into(),
            outcome: "success".into(),
            context: Map::new(),
            tags: vec![],
            high_risk: false,
            compliance: vec![],
            details: Map::new(),
            received_at: None,
        }
    }

    fn make_chain(n: usize) -> Vec<AuditLogEntry> {
        let mut builder = ChainBuilder::new(HashAlgorithm::Sha256);
        (0..n)
            .map(|i| builder.build_entry(make_draft(&format!("e{i:03}"))).unwrap())
            .collect()
    }

    #[test]
    fn clean_chain_audits_without_findings() {
        let entries = make_chain(4);
        let audit = audit_window(&entries, &ChainWindow::from_origin()).unwrap();
        assert!(audit.issues.is_empty());
        assert_eq!(audit.hashes_verified, 4);
        assert_eq!(audit.checks.len(), 4);
        assert!(audit.checks.iter().all(|c| c.content_hash_valid && c.link_valid));
    }

    #[test]
    fn audit_collects_findings_past_the_first_fault() {
        let mut entries = make_chain(4);
        entries[1].details.insert("added".into(), serde_json::json!(1));
        entries[3].details.insert("added".into(), serde_json::json!(2));

        let audit = audit_window(&entries, &ChainWindow::from_origin()).unwrap();
        let sequences: Vec<Option<u64>> = audit.issues.iter().map(|i| i.sequence()).collect();
        assert_eq!(sequences, vec![Some(1), Some(3)]);
        assert_eq!(audit.hashes_verified, 2);
    }

    #[test]
    fn gap_is_one_finding_per_missing_range() {
        let mut entries = make_chain(5);
        entries.remove(2);
        let issues = detect_sequence_gaps(&entries, 0);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].detail,
            IssueDetail::SequenceGap {
                missing_start: 2,
                missing_end: 2,
                missing_count: 1,
            }
        );
    }

    #[test]
    fn gap_before_the_window_start_is_detected() {
        let entries: Vec<AuditLogEntry> = make_chain(5).into_iter().skip(3).collect();
        let issues = detect_sequence_gaps(&entries, 0);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].detail,
            IssueDetail::SequenceGap {
                missing_start: 0,
                missing_end: 2,
                missing_count: 3,
            }
        );
    }

    #[test]
    fn multiple_gaps_yield_one_finding_each() {
        let entries: Vec<AuditLogEntry> = make_chain(8)
            .into_iter()
            .filter(|e| matches!(e.chain.sequence, 0 | 3 | 4 | 7))
            .collect();
        let issues = detect_sequence_gaps(&entries, 0);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].sequence(), Some(1));
        assert_eq!(issues[1].sequence(), Some(5));
    }

    #[test]
    fn duplicate_group_is_one_finding_with_all_ids() {
        let mut entries = make_chain(3);
        let mut twin = entries[2].clone();
        twin.id = "e-twin".into();
        entries.push(twin);

        let issues = detect_duplicate_sequences(&entries);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].detail,
            IssueDetail::SequenceDuplicate {
                sequence: 2,
                entry_ids: vec!["e002".into(), "e-twin".into()],
            }
        );
    }

    #[test]
    fn timestamp_regression_is_flagged_but_equal_is_not() {
        let mut entries = make_chain(3);
        entries[1].timestamp = "2026-02-10T08:00:00Z".parse().unwrap();
        entries[2].timestamp = "2026-02-10T07:59:59Z".parse().unwrap();

        let issues = verify_timestamp_order(&entries);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].sequence(), Some(2));

        let steady = make_chain(3);
        assert!(verify_timestamp_order(&steady).is_empty());
    }

    #[test]
    fn single_algorithm_is_consistent() {
        let entries = make_chain(3);
        assert!(check_algorithm_consistency(&entries).is_none());
    }

    #[test]
    fn mixed_algorithms_are_one_low_finding() {
        let mut entries = make_chain(2);
        entries[1].chain.algorithm = HashAlgorithm::Sha512;

        let issue = check_algorithm_consistency(&entries).unwrap();
        assert_eq!(
            issue.detail,
            IssueDetail::AlgorithmMismatch {
                algorithms: vec!["sha256".into(), "sha512".into()],
            }
        );
    }

    #[test]
    fn origin_window_rejects_a_present_prev_hash() {
        let mut entries = make_chain(2);
        entries[0].chain.prev_hash = Some("a".repeat(64));

        let audit = audit_window(&entries, &ChainWindow::from_origin()).unwrap();
        assert_eq!(audit.issues.len(), 1);
        assert!(matches!(
            audit.issues[0].detail,
            IssueDetail::FirstEntryInvalid { sequence: 0, .. }
        ));
    }

    #[test]
    fn anchored_window_checks_the_boundary_link() {
        let entries = make_chain(4);
        let anchor = entries[1].chain.content_hash.clone();
        let tail = &entries[2..];

        let good = audit_window(tail, &ChainWindow::anchored(2, anchor)).unwrap();
        assert!(good.issues.is_empty());

        let bad = audit_window(tail, &ChainWindow::anchored(2, "f".repeat(64))).unwrap();
        assert_eq!(bad.issues.len(), 1);
        assert!(matches!(
            bad.issues[0].detail,
            IssueDetail::FirstEntryInvalid { sequence: 2, .. }
        ));
    }

    #[test]
    fn unanchored_window_skips_the_boundary_check() {
        let entries = make_chain(4);
        let audit = audit_window(&entries[2..], &ChainWindow::unanchored(2)).unwrap();
        assert!(audit.issues.is_empty());
        assert!(audit.checks[0].link_valid);
    }
}
