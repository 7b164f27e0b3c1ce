//! Report and statistics assembly.

use chainseal_canonical::TenantId;
use chainseal_core::{AuditLogEntry, EntryCheck};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::issue::{IntegrityIssue, Severity};

/// Aggregate numbers for one verified window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStats {
    /// Entries present in the window.
    pub total_entries: u64,
    /// Entries whose recomputed content hash matched the stored one.
    pub verified_entries: u64,
    /// Sequences missing across every detected gap.
    pub missing_entries: u64,
    /// `verified / (verified + missing)` as a rounded percentage. A window
    /// with nothing verified and nothing missing reads 100.
    pub continuity_percent: f64,
    /// Lowest sequence in the window.
    pub first_sequence: Option<u64>,
    /// Highest sequence in the window.
    pub last_sequence: Option<u64>,
    /// Earliest entry timestamp in the window.
    pub first_timestamp: Option<DateTime<Utc>>,
    /// Latest entry timestamp in the window.
    pub last_timestamp: Option<DateTime<Utc>>,
}

/// Full verification report for one tenant window.
///
/// `valid` is the single pass/fail signal; `summary` is the one-line human
/// status; the issue list carries everything found, sorted by severity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Tenant whose chain was verified.
    pub tenant_id: TenantId,
    /// Whether the window holds: no critical and no high findings.
    pub valid: bool,
    /// When verification ran.
    pub verified_at: DateTime<Utc>,
    /// Wall-clock verification time in milliseconds.
    pub duration_ms: u64,
    /// Aggregate window numbers.
    pub stats: VerificationStats,
    /// Findings, sorted by severity then sequence.
    pub issues: Vec<IntegrityIssue>,
    /// One-line status.
    pub summary: String,
    /// Per-entry check outcomes, included on request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_details: Option<Vec<EntryCheck>>,
}

/// Computes aggregate numbers for a window.
///
/// Entries must be sorted ascending by sequence. `verified_entries` counts
/// entries that passed the content-hash check; `missing_entries` sums the
/// sizes of detected gaps. The time range is min/max over timestamps, not
/// first and last position.
pub fn calculate_stats(
    entries: &[AuditLogEntry],
    verified_entries: u64,
    missing_entries: u64,
) -> VerificationStats {
    let denominator = verified_entries + missing_entries;
    let continuity_percent = if denominator == 0 {
        100.0
    } else {
        (verified_entries as f64 / denominator as f64 * 100.0).round()
    };
    VerificationStats {
        total_entries: entries.len() as u64,
        verified_entries,
        missing_entries,
        continuity_percent,
        first_sequence: entries.first().map(|e| e.chain.sequence),
        last_sequence: entries.last().map(|e| e.chain.sequence),
        first_timestamp: entries.iter().map(|e| e.timestamp).min(),
        last_timestamp: entries.iter().map(|e| e.timestamp).max(),
    }
}

/// Whether a window passes: no finding of critical or high severity.
/// Medium and low findings are informational and do not fail the window.
pub fn window_valid(issues: &[IntegrityIssue]) -> bool {
    !issues
        .iter()
        .any(|issue| matches!(issue.severity, Severity::Critical | Severity::High))
}

/// One-line human status for a report.
///
/// An empty window is valid but carries a note, since absence of entries
/// is not evidence either way.
pub fn compose_summary(entry_count: usize, issues: &[IntegrityIssue]) -> String {
    if entry_count == 0 && issues.is_empty() {
        return "no entries in window; nothing to verify".to_string();
    }
    if issues.is_empty() {
        return format!("chain intact: {entry_count} entries verified");
    }

    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    let critical = count(Severity::Critical);
    let high = count(Severity::High);
    if critical == 0 && high == 0 {
        format!(
            "chain intact with {} advisory issue(s) across {entry_count} entries",
            issues.len()
        )
    } else {
        format!(
            "chain invalid: {critical} critical, {high} high, {} medium, {} low issue(s) across {entry_count} entries",
            count(Severity::Medium),
            count(Severity::Low)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueDetail;

    fn gap(missing_count: u64) -> IntegrityIssue {
        IntegrityIssue::new(IssueDetail::SequenceGap {
            missing_start: 1,
            missing_end: missing_count,
            missing_count,
        })
    }

    fn regression() -> IntegrityIssue {
        IntegrityIssue::new(IssueDetail::TimestampRegression {
            sequence: 1,
            entry_id: "e001".into(),
            timestamp: "2026-02-10T08:00:00Z".parse().unwrap(),
            previous_timestamp: "2026-02-10T09:00:00Z".parse().unwrap(),
        })
    }

    #[test]
    fn continuity_is_a_rounded_percentage() {
        assert_eq!(calculate_stats(&[], 4, 1).continuity_percent, 80.0);
        assert_eq!(calculate_stats(&[], 2, 1).continuity_percent, 67.0);
        assert_eq!(calculate_stats(&[], 0, 3).continuity_percent, 0.0);
        assert_eq!(calculate_stats(&[], 0, 0).continuity_percent, 100.0);
    }

    #[test]
    fn medium_and_low_findings_do_not_fail_the_window() {
        assert!(window_valid(&[]));
        assert!(window_valid(&[regression()]));
        assert!(!window_valid(&[gap(1)]));
        assert!(!window_valid(&[
            regression(),
            IntegrityIssue::new(IssueDetail::ContentHashMismatch {
                sequence: 0,
                entry_id: "e000".into(),
            }),
        ]));
    }

    #[test]
    fn summary_has_a_line_for_each_case() {
        assert_eq!(
            compose_summary(0, &[]),
            "no entries in window; nothing to verify"
        );
        assert_eq!(compose_summary(5, &[]), "chain intact: 5 entries verified");
        assert_eq!(
            compose_summary(5, &[regression()]),
            "chain intact with 1 advisory issue(s) across 5 entries"
        );
        assert_eq!(
            compose_summary(4, &[gap(2), regression()]),
            "chain invalid: 0 critical, 1 high, 1 medium, 0 low issue(s) across 4 entries"
        );
    }
}
