//! Content and context hashing over the fixed field set.
//!
//! The hashed content field set is fixed and versioned: `id`,
//! `schemaVersion`, `timestamp`, `actor`, `action`, `resource`, `outcome`,
//! `context`, `tags`, `highRisk`, `compliance`, `details`. Chain linkage
//! (`chain`), the context digest (`contextHash`), and ingestion time
//! (`receivedAt`) never participate, so a content hash can always be
//! recomputed from a stored entry and compared against the stored value.

use chainseal_canonical::{canonical_bytes, stringify_numbers, HashAlgorithm};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::entry::{AuditLogEntry, ContextHash, EntryDraft};
use crate::errors::ChainError;

/// Domain separator for content hashing.
const CONTENT_DOMAIN_SEPARATOR: &[u8] = b"chainseal:content:v1\0";

/// Domain separator for context hashing.
const CONTEXT_DOMAIN_SEPARATOR: &[u8] = b"chainseal:context:v1\0";

/// Context fields included in context hashes unless the builder is
/// configured with a different subset.
pub const DEFAULT_CONTEXT_FIELDS: [&str; 5] =
    ["ip", "requestId", "sessionId", "traceId", "userAgent"];

/// Borrowed view over exactly the fields that participate in content
/// hashing.
///
/// Changing this set is a schema version bump, not a configuration choice;
/// a field missing here can never leak into a digest.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryContent<'a> {
    id: &'a str,
    schema_version: u32,
    timestamp: &'a DateTime<Utc>,
    actor: &'a str,
    action: &'a str,
    resource: &'a str,
    outcome: &'a str,
    context: &'a Map<String, Value>,
    tags: &'a [String],
    high_risk: bool,
    compliance: &'a [String],
    details: &'a Map<String, Value>,
}

impl<'a> From<&'a AuditLogEntry> for EntryContent<'a> {
    fn from(entry: &'a AuditLogEntry) -> Self {
        Self {
            id: &entry.id,
            schema_version: entry.schema_version,
            timestamp: &entry.timestamp,
            actor: &entry.actor,
            action: &entry.action,
            resource: &entry.resource,
            outcome: &entry.outcome,
            context: &entry.context,
            tags: &entry.tags,
            high_risk: entry.high_risk,
            compliance: &entry.compliance,
            details: &entry.details,
        }
    }
}

impl<'a> From<&'a EntryDraft> for EntryContent<'a> {
    fn from(draft: &'a EntryDraft) -> Self {
        Self {
            id: &draft.id,
            schema_version: draft.schema_version,
            timestamp: &draft.timestamp,
            actor: &draft.actor,
            action: &draft.action,
            resource: &draft.resource,
            outcome: &draft.outcome,
            context: &draft.context,
            tags: &draft.tags,
            high_risk: draft.high_risk,
            compliance: &draft.compliance,
            details: &draft.details,
        }
    }
}

/// Computes the content hash of the fixed field set.
///
/// The content view is serialized, all numbers are stringified, and the
/// canonical bytes are hashed behind the content domain separator. Two
/// entries with equal content fields always hash identically, regardless of
/// field order or numeric formatting at the producer.
///
/// # Errors
///
/// Returns [`ChainError`] if serialization or canonicalization fails.
pub fn compute_content_hash(
    content: &EntryContent<'_>,
    algorithm: HashAlgorithm,
) -> Result<String, ChainError> {
    let mut value = serde_json::to_value(content)
        .map_err(|err| ChainError::Serialization(err.to_string()))?;
    stringify_numbers(&mut value);
    let bytes = canonical_bytes(&value)?;
    Ok(algorithm.digest_hex_prefixed(CONTENT_DOMAIN_SEPARATOR, &bytes))
}

/// Recomputes the content hash of a finished entry using its stored
/// algorithm.
///
/// # Errors
///
/// Returns [`ChainError`] if serialization or canonicalization fails.
pub fn recompute_content_hash(entry: &AuditLogEntry) -> Result<String, ChainError> {
    compute_content_hash(&EntryContent::from(entry), entry.chain.algorithm)
}

/// Computes the digest over the configured subset of `context`.
///
/// Only fields actually present in `context` are included. The returned
/// record lists exactly what was hashed, so the digest stays verifiable
/// even when a producer omitted some of the configured fields.
///
/// # Errors
///
/// Returns [`ChainError`] if canonicalization fails.
pub fn compute_context_hash(
    context: &Map<String, Value>,
    fields: &[String],
    algorithm: HashAlgorithm,
) -> Result<ContextHash, ChainError> {
    let mut included: Vec<String> = fields
        .iter()
        .filter(|name| context.contains_key(name.as_str()))
        .cloned()
        .collect();
    included.sort();
    included.dedup();

    let mut values = Map::new();
    for name in &included {
        if let Some(v) = context.get(name) {
            values.insert(name.clone(), v.clone());
        }
    }

    let mut payload = serde_json::json!({ "fields": included.clone(), "values": values });
    stringify_numbers(&mut payload);
    let bytes = canonical_bytes(&payload)?;

    Ok(ContextHash {
        algorithm,
        value: algorithm.digest_hex_prefixed(CONTEXT_DOMAIN_SEPARATOR, &bytes),
        fields: included,
    })
}

/// Verifies a finished entry's stored context hash.
///
/// Recomputes from `entry.context` using the stored field list and
/// algorithm; a context field that was altered or removed after sealing
/// makes this return `false`.
///
/// # Errors
///
/// Returns [`ChainError`] if canonicalization fails.
pub fn verify_context_hash(entry: &AuditLogEntry) -> Result<bool, ChainError> {
    let recomputed = compute_context_hash(
        &entry.context,
        &entry.context_hash.fields,
        entry.context_hash.algorithm,
    )?;
    Ok(recomputed.value == entry.context_hash.value)
}
