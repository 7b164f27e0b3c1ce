//! In-memory reference backend.

use std::collections::BTreeMap;

use chainseal_canonical::TenantId;
use chainseal_core::AuditLogEntry;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::traits::{EntryQuery, LogAppender, LogStore, StoreMetadata};

/// In-memory multi-tenant store for tests and tooling.
///
/// Entries are kept per tenant in insertion order; queries return them
/// sorted by sequence (stable, so duplicate sequences stay in insertion
/// order). Nothing is validated on append: the store records what the
/// writer produced, and audits judge it later.
#[derive(Debug, Default)]
pub struct MemoryStore {
    chains: BTreeMap<TenantId, TenantChain>,
}

#[derive(Debug, Default)]
struct TenantChain {
    entries: Vec<AuditLogEntry>,
    created_at: Option<DateTime<Utc>>,
    last_updated_at: Option<DateTime<Utc>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tenants with at least one appended entry.
    pub fn tenants(&self) -> Vec<TenantId> {
        self.chains.keys().cloned().collect()
    }
}

impl LogStore for MemoryStore {
    fn metadata(&self, tenant_id: &TenantId) -> Result<StoreMetadata, StoreError> {
        let Some(chain) = self.chains.get(tenant_id) else {
            return Ok(StoreMetadata::empty());
        };
        Ok(StoreMetadata {
            entry_count: chain.entries.len() as u64,
            last_sequence: chain.entries.iter().map(|e| e.chain.sequence).max(),
            created_at: chain.created_at,
            last_updated_at: chain.last_updated_at,
        })
    }

    fn query(&self, query: &EntryQuery) -> Result<Vec<AuditLogEntry>, StoreError> {
        let Some(chain) = self.chains.get(&query.tenant_id) else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<AuditLogEntry> = chain
            .entries
            .iter()
            .filter(|e| {
                query.start_sequence.map_or(true, |s| e.chain.sequence >= s)
                    && query.end_sequence.map_or(true, |s| e.chain.sequence <= s)
            })
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.chain.sequence);
        if let Some(limit) = query.limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }
}

impl LogAppender for MemoryStore {
    fn append(&mut self, tenant_id: &TenantId, entry: AuditLogEntry) -> Result<(), StoreError> {
        let now = Utc::now();
        let chain = self.chains.entry(tenant_id.clone()).or_default();
        if chain.created_at.is_none() {
            chain.created_at = Some(now);
        }
        chain.last_updated_at = Some(now);
        chain.entries.push(entry);
        Ok(())
    }
}
