use chainseal_canonical::{HashAlgorithm, TenantId};
use chainseal_core::{
    verify_chain, AuditLogEntry, ChainBuilder, ChainWindow, EntryDraft,
};
use chainseal_store::{
    read_drafts, read_entries, EntryQuery, JsonlWriter, LogAppender, LogStore, MemoryStore,
    StoreError,
};
use serde_json::Map;
use std::fs;
use tempfile::TempDir;

fn make_draft(id: &str) -> EntryDraft {
    EntryDraft {
        id: id.into(),
        schema_version: 1,
        timestamp: "2026-05-20T14:00:00Z".parse().unwrap(),
        actor: "service:api".into(),
        action: "role.grant".into(),
        resource: format!("role:{}", id),
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
    let drafts = (0..n).map(|i| make_draft(&format!("s{:03}", i))).collect();
    builder.build_entries(drafts).unwrap()
}

fn tenant(name: &str) -> TenantId {
    TenantId::parse(name).unwrap()
}

#[test]
fn memory_store_returns_entries_in_sequence_order() {
    let mut store = MemoryStore::new();
    let t = tenant("acme");
    let entries = make_chain(5);
    // Append out of order; the store sorts on query.
    for entry in [4usize, 0, 2, 1, 3].map(|i| entries[i].clone()) {
        store.append(&t, entry).unwrap();
    }

    let result = store.query(&EntryQuery::all(t)).unwrap();
    let sequences: Vec<u64> = result.iter().map(|e| e.chain.sequence).collect();
    assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
}

#[test]
fn memory_store_windows_and_limits_queries() {
    let mut store = MemoryStore::new();
    let t = tenant("acme");
    for entry in make_chain(10) {
        store.append(&t, entry).unwrap();
    }

    let windowed = store
        .query(&EntryQuery::all(t.clone()).from_sequence(3).to_sequence(7))
        .unwrap();
    assert_eq!(windowed.len(), 5);
    assert_eq!(windowed[0].chain.sequence, 3);
    assert_eq!(windowed[4].chain.sequence, 7);

    let limited = store
        .query(&EntryQuery::all(t).from_sequence(3).with_limit(2))
        .unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[1].chain.sequence, 4);
}

#[test]
fn memory_store_metadata_tracks_the_chain() {
    let mut store = MemoryStore::new();
    let t = tenant("acme");

    let empty = store.metadata(&t).unwrap();
    assert_eq!(empty.entry_count, 0);
    assert!(empty.last_sequence.is_none());
    assert!(empty.created_at.is_none());

    for entry in make_chain(3) {
        store.append(&t, entry).unwrap();
    }
    let meta = store.metadata(&t).unwrap();
    assert_eq!(meta.entry_count, 3);
    assert_eq!(meta.last_sequence, Some(2));
    assert!(meta.created_at.is_some());
    assert!(meta.last_updated_at.is_some());
}

#[test]
fn unknown_tenant_yields_empty_results() {
    let store = MemoryStore::new();
    let result = store.query(&EntryQuery::all(tenant("ghost"))).unwrap();
    assert!(result.is_empty());
}

#[test]
fn duplicate_sequences_are_preserved() {
    let mut store = MemoryStore::new();
    let t = tenant("acme");
    let entries = make_chain(3);
    for entry in &entries {
        store.append(&t, entry.clone()).unwrap();
    }
    // A faulty writer re-minted sequence 1 with different content.
    let mut dup = entries[1].clone();
    dup.id = "s-dup".into();
    store.append(&t, dup).unwrap();

    let result = store.query(&EntryQuery::all(t)).unwrap();
    assert_eq!(result.len(), 4);
    let seq_ones: Vec<&str> = result
        .iter()
        .filter(|e| e.chain.sequence == 1)
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(seq_ones, vec!["s001", "s-dup"]);
}

#[test]
fn tenants_are_isolated() {
    let mut store = MemoryStore::new();
    let entries = make_chain(2);
    store.append(&tenant("alpha"), entries[0].clone()).unwrap();
    store.append(&tenant("beta"), entries[1].clone()).unwrap();

    assert_eq!(store.tenants(), vec![tenant("alpha"), tenant("beta")]);
    assert_eq!(store.query(&EntryQuery::all(tenant("alpha"))).unwrap().len(), 1);
    assert_eq!(store.query(&EntryQuery::all(tenant("beta"))).unwrap().len(), 1);
}

#[test]
fn jsonl_round_trip_preserves_a_verifiable_chain() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("entries.jsonl");
    let entries = make_chain(6);

    {
        let mut writer = JsonlWriter::create(&path).unwrap();
        for entry in &entries {
            writer.append(entry).unwrap();
        }
        writer.finish().unwrap();
    }

    let restored = read_entries(&path).unwrap();
    assert_eq!(restored, entries);
    let result = verify_chain(&restored, &ChainWindow::from_origin()).unwrap();
    assert!(result.valid);
}

#[test]
fn jsonl_open_appends_to_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("entries.jsonl");
    let entries = make_chain(4);

    {
        let mut writer = JsonlWriter::create(&path).unwrap();
        writer.append(&entries[0]).unwrap();
        writer.append(&entries[1]).unwrap();
        writer.finish().unwrap();
    }
    {
        let mut writer = JsonlWriter::open(&path).unwrap();
        writer.append(&entries[2]).unwrap();
        writer.append(&entries[3]).unwrap();
        writer.finish().unwrap();
    }

    let restored = read_entries(&path).unwrap();
    assert_eq!(restored.len(), 4);
    assert!(verify_chain(&restored, &ChainWindow::from_origin()).unwrap().valid);
}

#[test]
fn blank_lines_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("entries.jsonl");
    let entries = make_chain(2);
    let mut content = serde_json::to_string(&entries[0]).unwrap();
    content.push_str("\n\n   \n");
    content.push_str(&serde_json::to_string(&entries[1]).unwrap());
    content.push('\n');
    fs::write(&path, content).unwrap();

    let restored = read_entries(&path).unwrap();
    assert_eq!(restored.len(), 2);
}

#[test]
fn parse_errors_carry_the_line_number() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("entries.jsonl");
    let entries = make_chain(1);
    let mut content = serde_json::to_string(&entries[0]).unwrap();
    content.push_str("\n{not json}\n");
    fs::write(&path, content).unwrap();

    match read_entries(&path) {
        Err(StoreError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other.map(|v| v.len())),
    }
}

#[test]
fn drafts_read_from_jsonl_without_chain_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("drafts.jsonl");
    let content = concat!(
        r#"{"id":"d1","timestamp":"2026-05-20T14:00:00Z","actor":"user:dana","action":"login","resource":"session","outcome":"success"}"#,
        "\n",
        r#"{"id":"d2","timestamp":"2026-05-20T14:01:00Z","actor":"user:dana","action":"logout","resource":"session","outcome":"success","tags":["auth"]}"#,
        "\n",
    );
    fs::write(&path, content).unwrap();

    let drafts = read_drafts(&path).unwrap();
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].schema_version, 1);
    assert!(drafts[0].context.is_empty());
    assert_eq!(drafts[1].tags, vec!["auth".to_string()]);

    let mut builder = ChainBuilder::new(HashAlgorithm::Sha256);
    let built = builder.build_entries(drafts).unwrap();
    assert!(verify_chain(&built, &ChainWindow::from_origin()).unwrap().valid);
}
