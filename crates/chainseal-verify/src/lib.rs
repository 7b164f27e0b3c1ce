//! Full-window audit and verification reporting for audit chains.
//!
//! Where [`chainseal_core::verify_chain`] stops at the first fault, this
//! crate keeps going: one pass over a tenant's window collects every
//! finding (tampered content, broken links, sequence gaps and duplicates,
//! timestamp regressions, mixed algorithms) as typed [`IntegrityIssue`]
//! values with fixed severities, then folds them into a
//! [`VerificationReport`] carrying a single pass/fail signal.
//!
//! Integrity findings are values, not errors. Errors are reserved for the
//! store and for entries that cannot be hashed at all, so an
//! infrastructure failure is never misread as a security finding.
//!
#![deny(missing_docs)]

/// Pure audit checks and detectors over a queried window.
pub mod checks;
/// Typed findings and their fixed severities.
pub mod issue;
/// Report and statistics assembly.
pub mod report;
/// Store-backed verification service.
pub mod service;

pub use checks::{
    audit_window, check_algorithm_consistency, detect_duplicate_sequences, detect_sequence_gaps,
    verify_timestamp_order, WindowAudit,
};
pub use issue::{sort_issues, IntegrityIssue, IssueDetail, Severity};
pub use report::{
    calculate_stats, compose_summary, window_valid, VerificationReport, VerificationStats,
};
pub use service::{ChainHealth, VerificationService, VerifyError, VerifyRequest};
