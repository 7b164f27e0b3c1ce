//! Typed integrity findings and their fixed severities.
//!
//! A full-window audit collects findings instead of raising on the first
//! one, so a single pass surfaces tampering, broken links, gaps, and
//! duplicates together. Findings are values, never errors: a store failure
//! is an error, a damaged chain is a result.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Urgency bucket for a finding.
///
/// The operational contract: `critical` findings are alert-breaking,
/// `high` are urgent, `medium` and `low` are informational. Ordering
/// follows urgency, so an ascending sort puts `Critical` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cryptographic evidence of tampering.
    Critical,
    /// Structural damage to the chain.
    High,
    /// Suspicious but often explainable, such as clock noise.
    Medium,
    /// Informational, such as an algorithm rotation in progress.
    Low,
}

/// What exactly was found, with the evidence needed to locate it.
///
/// Serialized with a `kind` tag so reports stay greppable by finding kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum IssueDetail {
    /// Stored content hash does not match the hash recomputed from the
    /// entry's content fields.
    ContentHashMismatch {
        /// Sequence of the tampered entry.
        sequence: u64,
        /// Identifier of the tampered entry.
        entry_id: String,
    },
    /// `prev_hash` does not match the stored content hash of the entry
    /// preceding it in the window.
    ChainLinkBroken {
        /// Sequence of the entry whose link failed.
        sequence: u64,
        /// Identifier of the entry whose link failed.
        entry_id: String,
    },
    /// A contiguous range of sequences is absent from the window.
    SequenceGap {
        /// First missing sequence.
        missing_start: u64,
        /// Last missing sequence.
        missing_end: u64,
        /// Number of missing sequences in the range.
        missing_count: u64,
    },
    /// More than one entry claims the same sequence.
    SequenceDuplicate {
        /// The duplicated sequence.
        sequence: u64,
        /// Every entry in the group, in window order.
        entry_ids: Vec<String>,
    },
    /// The first entry violates the window boundary rule: a `prev_hash`
    /// where the chain origin demands none, or a mismatch against the
    /// caller-supplied anchor hash.
    FirstEntryInvalid {
        /// Sequence of the first entry.
        sequence: u64,
        /// Identifier of the first entry.
        entry_id: String,
    },
    /// Entry timestamp is strictly earlier than its predecessor's.
    TimestampRegression {
        /// Sequence of the regressed entry.
        sequence: u64,
        /// Identifier of the regressed entry.
        entry_id: String,
        /// The regressed timestamp.
        timestamp: DateTime<Utc>,
        /// The predecessor's timestamp.
        previous_timestamp: DateTime<Utc>,
    },
    /// The window spans more than one hash algorithm.
    AlgorithmMismatch {
        /// Distinct algorithms, in order of first appearance.
        algorithms: Vec<String>,
    },
}

impl IssueDetail {
    /// Fixed severity for this finding kind.
    pub fn severity(&self) -> Severity {
        match self {
            IssueDetail::ContentHashMismatch { .. } | IssueDetail::ChainLinkBroken { .. } => {
                Severity::Critical
            }
            IssueDetail::SequenceGap { .. }
            | IssueDetail::SequenceDuplicate { .. }
            | IssueDetail::FirstEntryInvalid { .. } => Severity::High,
            IssueDetail::TimestampRegression { .. } => Severity::Medium,
            IssueDetail::AlgorithmMismatch { .. } => Severity::Low,
        }
    }

    /// Sequence the finding is anchored to, for sorting and display. Gaps
    /// anchor to their first missing sequence; window-wide findings have
    /// none.
    pub fn sequence(&self) -> Option<u64> {
        match self {
            IssueDetail::ContentHashMismatch { sequence, .. }
            | IssueDetail::ChainLinkBroken { sequence, .. }
            | IssueDetail::SequenceDuplicate { sequence, .. }
            | IssueDetail::FirstEntryInvalid { sequence, .. }
            | IssueDetail::TimestampRegression { sequence, .. } => Some(*sequence),
            IssueDetail::SequenceGap { missing_start, .. } => Some(*missing_start),
            IssueDetail::AlgorithmMismatch { .. } => None,
        }
    }
}

/// A single integrity finding.
///
/// The severity is fixed per finding kind; construction through
/// [`IntegrityIssue::new`] keeps the two from drifting apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityIssue {
    /// Urgency bucket, fixed for the finding kind.
    pub severity: Severity,
    /// The finding itself.
    #[serde(flatten)]
    pub detail: IssueDetail,
}

impl IntegrityIssue {
    /// Wraps a finding with the severity fixed for its kind.
    pub fn new(detail: IssueDetail) -> Self {
        Self {
            severity: detail.severity(),
            detail,
        }
    }

    /// Sequence this finding is anchored to, when it has one.
    pub fn sequence(&self) -> Option<u64> {
        self.detail.sequence()
    }
}

/// Sorts findings by severity, then by anchor sequence, for stable report
/// output. Findings without a sequence sort last within their severity.
pub fn sort_issues(issues: &mut [IntegrityIssue]) {
    issues.sort_by_key(|issue| {
        let sequence = issue.sequence();
        (issue.severity, sequence.is_none(), sequence.unwrap_or(0))
    });
}
