use chainseal_canonical::HashAlgorithm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version of the hashed content field set produced by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// Cryptographic link binding an entry to its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLink {
    /// Zero-based position in the tenant's chain.
    pub sequence: u64,
    /// Content hash of the previous entry; `None` only for the first entry.
    /// Serialized as an explicit `null`, never omitted.
    pub prev_hash: Option<String>,
    /// Digest over this entry's hashed content fields.
    pub content_hash: String,
    /// Algorithm that produced both hashes. Stored per entry so chains
    /// survive algorithm migrations without a registry lookup.
    pub algorithm: HashAlgorithm,
    /// When the link was computed.
    pub computed_at: DateTime<Utc>,
}

/// Privacy-preserving digest over a subset of an entry's context fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextHash {
    /// Algorithm that produced the digest.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex digest value.
    pub value: String,
    /// Context field names that were present and included, sorted.
    pub fields: Vec<String>,
}

/// A finished, immutable audit log entry.
///
/// Once built, no field may change: `chain.content_hash` commits to the
/// hashed content fields, and the successor entry's `prev_hash` commits to
/// this entry. Mutation of stored entries is detectable, not preventable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Caller-assigned unique entry identifier.
    pub id: String,
    /// Version of the hashed field set this entry was built under.
    pub schema_version: u32,
    /// When the recorded action occurred.
    pub timestamp: DateTime<Utc>,
    /// Who performed the action.
    pub actor: String,
    /// What was done. The action taxonomy is defined by the producer.
    pub action: String,
    /// What the action was performed on.
    pub resource: String,
    /// Result of the action (e.g., "success", "failure", "denied").
    pub outcome: String,
    /// Request context: trace identifiers, client address, and similar.
    #[serde(default)]
    pub context: Map<String, Value>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the producer flagged the action as high risk.
    #[serde(default)]
    pub high_risk: bool,
    /// Compliance regimes the entry is relevant to.
    #[serde(default)]
    pub compliance: Vec<String>,
    /// Additional structured payload.
    #[serde(default)]
    pub details: Map<String, Value>,
    /// When the entry reached the chain builder. Excluded from hashing.
    pub received_at: DateTime<Utc>,
    /// Chain linkage for this entry.
    pub chain: ChainLink,
    /// Digest over the configured context field subset.
    pub context_hash: ContextHash,
}

/// Input record for a new entry, before any chain field exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    /// Caller-assigned unique entry identifier.
    pub id: String,
    /// Version of the hashed field set.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// When the recorded action occurred.
    pub timestamp: DateTime<Utc>,
    /// Who performed the action.
    pub actor: String,
    /// What was done.
    pub action: String,
    /// What the action was performed on.
    pub resource: String,
    /// Result of the action.
    pub outcome: String,
    /// Request context.
    #[serde(default)]
    pub context: Map<String, Value>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the producer flagged the action as high risk.
    #[serde(default)]
    pub high_risk: bool,
    /// Compliance regimes.
    #[serde(default)]
    pub compliance: Vec<String>,
    /// Additional structured payload.
    #[serde(default)]
    pub details: Map<String, Value>,
    /// Ingestion time override; the builder stamps the current time when
    /// absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}
