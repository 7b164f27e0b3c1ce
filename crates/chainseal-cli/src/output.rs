//! Output formatting utilities.

use chainseal_core::AuditLogEntry;
use chrono::SecondsFormat;

/// Prints the entry table header.
#[allow(clippy::print_literal)]
pub fn print_entry_table_header() {
    println!(
        "{:<6} {:<18} {:<22} {:<22} {:<10} {}",
        "SEQ", "ID", "TIMESTAMP", "ACTION", "OUTCOME", "CONTENT_HASH"
    );
    println!("{}", "-".repeat(100));
}

/// Formats an entry as a simple table row.
pub fn format_entry_row(entry: &AuditLogEntry) -> String {
    format!(
        "{:<6} {:<18} {:<22} {:<22} {:<10} {}",
        entry.chain.sequence,
        truncate(&entry.id, 18),
        entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        truncate(&entry.action, 22),
        truncate(&entry.outcome, 10),
        truncate(&entry.chain.content_hash, 16)
    )
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
