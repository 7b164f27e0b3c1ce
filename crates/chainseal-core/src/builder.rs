//! Chain construction.

use chainseal_canonical::HashAlgorithm;
use chrono::Utc;
use tracing::debug;

use crate::content::{
    compute_content_hash, compute_context_hash, EntryContent, DEFAULT_CONTEXT_FIELDS,
};
use crate::entry::{AuditLogEntry, ChainLink, EntryDraft};
use crate::errors::ChainError;

/// Cursor for the next link in a tenant's chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainState {
    /// Sequence number the next entry will carry.
    pub sequence: u64,
    /// Content hash of the last built entry; `None` before the first.
    pub last_hash: Option<String>,
    /// Algorithm for every hash this chain produces.
    pub algorithm: HashAlgorithm,
}

impl ChainState {
    /// State for a brand-new chain: sequence 0, no predecessor.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            sequence: 0,
            last_hash: None,
            algorithm,
        }
    }

    /// State positioned immediately after an existing entry, e.g. the last
    /// persisted entry on restart.
    pub fn after(entry: &AuditLogEntry) -> Self {
        Self {
            sequence: entry.chain.sequence + 1,
            last_hash: Some(entry.chain.content_hash.clone()),
            algorithm: entry.chain.algorithm,
        }
    }

    /// Raw resume from persisted cursor values.
    ///
    /// `sequence` is the next sequence to assign and `last_hash` the content
    /// hash of the entry before it. The pair is taken as-is; an inconsistent
    /// pair produces links the verifier will flag, not a panic.
    pub fn resume(sequence: u64, last_hash: Option<String>, algorithm: HashAlgorithm) -> Self {
        Self {
            sequence,
            last_hash,
            algorithm,
        }
    }

    /// Builds the chain link the next entry will carry, without advancing.
    pub fn next_link(&self, content_hash: String) -> ChainLink {
        ChainLink {
            sequence: self.sequence,
            prev_hash: self.last_hash.clone(),
            content_hash,
            algorithm: self.algorithm,
            computed_at: Utc::now(),
        }
    }

    /// Advances past an entry whose content hash is `content_hash`.
    pub fn advance(&mut self, content_hash: String) {
        self.sequence += 1;
        self.last_hash = Some(content_hash);
    }
}

/// Appends entries to one tenant chain.
///
/// Exactly one builder may be live per tenant chain: sequence assignment is
/// a read-modify-write on [`ChainState`], so concurrent writers would mint
/// duplicate sequences and fork the chain. `&mut self` enforces the single
/// writer in-process; across processes the host must serialize appends
/// (queue, lease, or equivalent). Verification never needs this exclusivity,
/// it only reads finished entries.
#[derive(Debug)]
pub struct ChainBuilder {
    state: ChainState,
    context_fields: Vec<String>,
}

impl ChainBuilder {
    /// Builder for a brand-new chain.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self::resume(ChainState::new(algorithm))
    }

    /// Builder continuing from a persisted chain position.
    pub fn resume(state: ChainState) -> Self {
        Self {
            state,
            context_fields: DEFAULT_CONTEXT_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the context field subset included in context hashes.
    pub fn with_context_fields(mut self, fields: Vec<String>) -> Self {
        self.context_fields = fields;
        self
    }

    /// Current chain position.
    pub fn state(&self) -> &ChainState {
        &self.state
    }

    /// Builds the next entry in the chain from a draft.
    ///
    /// Computes the content hash, chain link, and context hash, then
    /// advances the builder past the new entry. `received_at` is stamped
    /// with the current time unless the draft carries one.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError`] if hashing fails; the builder state is
    /// unchanged on error.
    pub fn build_entry(&mut self, draft: EntryDraft) -> Result<AuditLogEntry, ChainError> {
        let content_hash =
            compute_content_hash(&EntryContent::from(&draft), self.state.algorithm)?;
        let context_hash =
            compute_context_hash(&draft.context, &self.context_fields, self.state.algorithm)?;

        let chain = self.state.next_link(content_hash.clone());
        debug!(
            sequence = chain.sequence,
            id = %draft.id,
            "sealed entry into chain"
        );
        self.state.advance(content_hash);

        let received_at = draft.received_at.unwrap_or_else(Utc::now);
        Ok(AuditLogEntry {
            id: draft.id,
            schema_version: draft.schema_version,
            timestamp: draft.timestamp,
            actor: draft.actor,
            action: draft.action,
            resource: draft.resource,
            outcome: draft.outcome,
            context: draft.context,
            tags: draft.tags,
            high_risk: draft.high_risk,
            compliance: draft.compliance,
            details: draft.details,
            received_at,
            chain,
            context_hash,
        })
    }

    /// Builds a batch of entries in draft order.
    ///
    /// Drafts chain sequentially: each entry's `prev_hash` depends on the
    /// previous draft's content hash, so a batch cannot be built out of
    /// order or in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError`] on the first draft that fails to hash; the
    /// builder state rolls back to the batch start, so no partial batch is
    /// ever observable.
    pub fn build_entries(
        &mut self,
        drafts: Vec<EntryDraft>,
    ) -> Result<Vec<AuditLogEntry>, ChainError> {
        let checkpoint = self.state.clone();
        let mut entries = Vec::with_capacity(drafts.len());
        for draft in drafts {
            match self.build_entry(draft) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    self.state = checkpoint;
                    return Err(err);
                }
            }
        }
        Ok(entries)
    }
}
