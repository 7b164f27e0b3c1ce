//! Store-backed verification service.
//!
//! The service owns an injected [`LogStore`] and turns queried windows
//! into [`VerificationReport`]s. Construction is explicit: a host that
//! verifies several chains runs several services, or shares one behind its
//! own synchronization. Verification itself is read-only and pure.

use std::time::Instant;

use chainseal_canonical::TenantId;
use chainseal_core::{ChainError, ChainWindow};
use chainseal_store::{EntryQuery, LogStore, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::checks::{
    audit_window, check_algorithm_consistency, detect_duplicate_sequences, detect_sequence_gaps,
    verify_timestamp_order,
};
use crate::issue::{sort_issues, IssueDetail};
use crate::report::{calculate_stats, compose_summary, window_valid, VerificationReport};

/// Entries sampled by [`VerificationService::chain_health`] when checking
/// algorithm diversity.
const HEALTH_SAMPLE_LIMIT: usize = 16;

/// Failures outside the chain itself.
///
/// A tampered chain is never an error; it is a report with
/// `valid == false`. Errors are reserved for the store and for entries
/// that cannot be hashed at all.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The log store failed. Says nothing about chain validity.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// An entry could not be serialized for hashing.
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Options for one verification run.
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    /// Lowest sequence to verify. Defaults to the first stored entry.
    pub start_sequence: Option<u64>,
    /// Highest sequence to verify.
    pub end_sequence: Option<u64>,
    /// Cap on entries pulled from the store, bounding latency and cost.
    pub max_entries: Option<usize>,
    /// Known content hash of the entry immediately before the window.
    /// Without it, a window not starting at sequence 0 gets no boundary
    /// link check; supplying it is the caller's obligation when the link
    /// into the window matters.
    pub expected_first_prev_hash: Option<String>,
    /// Whether to flag timestamp regressions.
    pub check_timestamps: bool,
    /// Whether to include per-entry check outcomes in the report.
    pub include_entry_details: bool,
}

impl Default for VerifyRequest {
    /// Whole chain, timestamp checks on, no per-entry details.
    fn default() -> Self {
        Self {
            start_sequence: None,
            end_sequence: None,
            max_entries: None,
            expected_first_prev_hash: None,
            check_timestamps: true,
            include_entry_details: false,
        }
    }
}

/// Cheap chain status from stored metadata plus a small entry sample.
///
/// Deliberately not a verification: no hash is recomputed, so a healthy
/// chain here can still fail a full audit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainHealth {
    /// Tenant whose chain was checked.
    pub tenant_id: TenantId,
    /// Entries the store reports.
    pub entry_count: u64,
    /// Highest stored sequence.
    pub last_sequence: Option<u64>,
    /// Entries a gapless chain through `last_sequence` would hold.
    pub expected_entries: u64,
    /// `entry_count / expected_entries` as a rounded percentage; above 100
    /// means duplicate sequences.
    pub completeness_percent: f64,
    /// Algorithms seen in the sampled entries, in order of appearance.
    pub algorithms: Vec<String>,
    /// Whether the stored count matches the expected count.
    pub healthy: bool,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}

/// Verification engine over one injected log store.
#[derive(Debug)]
pub struct VerificationService<S> {
    store: S,
}

impl<S: LogStore> VerificationService<S> {
    /// Creates a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs a full integrity audit over one tenant's queried window.
    ///
    /// Entries are queried, sorted ascending by sequence, and checked
    /// without stopping at the first fault: content hashes, pairwise
    /// links, the window boundary rule, sequence gaps and duplicates,
    /// timestamp order when requested, and algorithm consistency. An empty
    /// window is valid; absence of entries is not evidence of tampering.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Store`] when the store fails, never folded
    /// into chain validity, and [`VerifyError::Chain`] when an entry
    /// cannot be serialized for hashing.
    pub fn verify_tenant(
        &self,
        tenant_id: &TenantId,
        request: &VerifyRequest,
    ) -> Result<VerificationReport, VerifyError> {
        let started = Instant::now();

        let mut query = EntryQuery::all(tenant_id.clone());
        query.start_sequence = request.start_sequence;
        query.end_sequence = request.end_sequence;
        query.limit = request.max_entries;

        let mut entries = self.store.query(&query)?;
        entries.sort_by_key(|entry| entry.chain.sequence);

        let expected_start = request
            .start_sequence
            .or_else(|| entries.first().map(|entry| entry.chain.sequence))
            .unwrap_or(0);
        let window = ChainWindow {
            start_sequence: expected_start,
            expected_first_prev_hash: request.expected_first_prev_hash.clone(),
        };

        let audit = audit_window(&entries, &window)?;
        let mut issues = audit.issues;
        issues.extend(detect_sequence_gaps(&entries, expected_start));
        issues.extend(detect_duplicate_sequences(&entries));
        if request.check_timestamps {
            issues.extend(verify_timestamp_order(&entries));
        }
        issues.extend(check_algorithm_consistency(&entries));
        sort_issues(&mut issues);

        let missing_entries: u64 = issues
            .iter()
            .filter_map(|issue| match issue.detail {
                IssueDetail::SequenceGap { missing_count, .. } => Some(missing_count),
                _ => None,
            })
            .sum();
        let stats = calculate_stats(&entries, audit.hashes_verified, missing_entries);
        let valid = window_valid(&issues);
        let summary = compose_summary(entries.len(), &issues);
        debug!(
            tenant = %tenant_id,
            entries = entries.len(),
            issues = issues.len(),
            valid,
            "window audit finished"
        );

        Ok(VerificationReport {
            tenant_id: tenant_id.clone(),
            valid,
            verified_at: Utc::now(),
            duration_ms: started.elapsed().as_millis() as u64,
            stats,
            issues,
            summary,
            entry_details: request.include_entry_details.then_some(audit.checks),
        })
    }

    /// Cheap health check from store metadata and a small entry sample.
    ///
    /// Consults `entry_count` and `last_sequence` only, then samples up to
    /// 16 entries for algorithm diversity. Suitable for a dashboard poll
    /// where a full audit would be too expensive.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Store`] when the store fails.
    pub fn chain_health(&self, tenant_id: &TenantId) -> Result<ChainHealth, VerifyError> {
        let metadata = self.store.metadata(tenant_id)?;
        let expected_entries = metadata.last_sequence.map_or(0, |last| last + 1);
        let completeness_percent = if expected_entries == 0 {
            100.0
        } else {
            (metadata.entry_count as f64 / expected_entries as f64 * 100.0).round()
        };

        let sample = self
            .store
            .query(&EntryQuery::all(tenant_id.clone()).with_limit(HEALTH_SAMPLE_LIMIT))?;
        let mut algorithms: Vec<String> = Vec::new();
        for entry in &sample {
            let name = entry.chain.algorithm.name().to_string();
            if !algorithms.contains(&name) {
                algorithms.push(name);
            }
        }

        let healthy = metadata.entry_count == expected_entries;
        debug!(
            tenant = %tenant_id,
            entry_count = metadata.entry_count,
            expected = expected_entries,
            healthy,
            "chain health sampled"
        );

        Ok(ChainHealth {
            tenant_id: tenant_id.clone(),
            entry_count: metadata.entry_count,
            last_sequence: metadata.last_sequence,
            expected_entries,
            completeness_percent,
            algorithms,
            healthy,
            checked_at: Utc::now(),
        })
    }
}
