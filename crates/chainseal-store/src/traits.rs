//! Storage backend traits.

use chainseal_canonical::TenantId;
use chainseal_core::AuditLogEntry;
use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// Summary of one tenant's stored chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMetadata {
    /// Number of stored entries.
    pub entry_count: u64,
    /// Highest stored sequence, `None` for an empty chain.
    pub last_sequence: Option<u64>,
    /// When the chain was first written, when known.
    pub created_at: Option<DateTime<Utc>>,
    /// When the chain last changed, when known.
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl StoreMetadata {
    /// Metadata for a chain with no entries.
    pub fn empty() -> Self {
        Self {
            entry_count: 0,
            last_sequence: None,
            created_at: None,
            last_updated_at: None,
        }
    }
}

/// Query window over one tenant's entries.
#[derive(Debug, Clone)]
pub struct EntryQuery {
    /// Tenant whose chain is queried.
    pub tenant_id: TenantId,
    /// Lowest sequence to include.
    pub start_sequence: Option<u64>,
    /// Highest sequence to include.
    pub end_sequence: Option<u64>,
    /// Cap on returned entries, applied after the range filter.
    pub limit: Option<usize>,
}

impl EntryQuery {
    /// Query for a tenant's full chain.
    pub fn all(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            start_sequence: None,
            end_sequence: None,
            limit: None,
        }
    }

    /// Restricts the window to sequences at or above `start`.
    pub fn from_sequence(mut self, start: u64) -> Self {
        self.start_sequence = Some(start);
        self
    }

    /// Restricts the window to sequences at or below `end`.
    pub fn to_sequence(mut self, end: u64) -> Self {
        self.end_sequence = Some(end);
        self
    }

    /// Caps the number of returned entries.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read access to stored audit chains.
///
/// Implementations return entries ordered by sequence ascending, keeping
/// duplicate sequences rather than collapsing them: an audit must be able
/// to observe writer faults the store happened to record. A tenant with no
/// stored entries yields empty results, not an error.
pub trait LogStore {
    /// Chain summary for a tenant.
    fn metadata(&self, tenant_id: &TenantId) -> Result<StoreMetadata, StoreError>;

    /// Entries in the query window, ordered by sequence ascending.
    fn query(&self, query: &EntryQuery) -> Result<Vec<AuditLogEntry>, StoreError>;
}

/// Append access to stored audit chains.
pub trait LogAppender {
    /// Appends a finished entry to a tenant's chain.
    fn append(&mut self, tenant_id: &TenantId, entry: AuditLogEntry) -> Result<(), StoreError>;
}
