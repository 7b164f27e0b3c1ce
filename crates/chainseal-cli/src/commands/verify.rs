//! Verify command implementation.

use chainseal_canonical::TenantId;
use chainseal_store::{read_entries, LogAppender, MemoryStore};
use chainseal_verify::{VerificationService, VerifyRequest};

use crate::output::truncate;

#[allow(clippy::too_many_arguments)]
pub fn run(
    entries_path: String,
    tenant: String,
    json_output: bool,
    strict: bool,
    start_sequence: Option<u64>,
    prev_hash: Option<String>,
    max_entries: Option<usize>,
    details: bool,
    no_timestamp_check: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries =
        read_entries(&entries_path).map_err(|e| format!("Failed to read entries: {}", e))?;

    let tenant_id = TenantId::new(tenant);
    let mut store = MemoryStore::new();
    for entry in entries {
        store.append(&tenant_id, entry)?;
    }

    let service = VerificationService::new(store);
    let request = VerifyRequest {
        start_sequence,
        end_sequence: None,
        max_entries,
        expected_first_prev_hash: prev_hash,
        check_timestamps: !no_timestamp_check,
        include_entry_details: details,
    };
    let report = service.verify_tenant(&tenant_id, &request)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary);
        println!(
            "entries: {}  verified: {}  missing: {}  continuity: {}%",
            report.stats.total_entries,
            report.stats.verified_entries,
            report.stats.missing_entries,
            report.stats.continuity_percent
        );

        if !report.issues.is_empty() {
            println!();
            println!("{:<10} {:<6} {}", "SEVERITY", "SEQ", "KIND");
            println!("{}", "-".repeat(50));
            for issue in &report.issues {
                let value = serde_json::to_value(issue)?;
                let severity = value["severity"].as_str().unwrap_or("?").to_string();
                let kind = value["kind"].as_str().unwrap_or("?").to_string();
                let seq = issue
                    .sequence()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<10} {:<6} {}", severity, seq, kind);
            }
        }

        if let Some(checks) = &report.entry_details {
            println!();
            println!("{:<6} {:<20} {:<8} {}", "SEQ", "ID", "CONTENT", "LINK");
            println!("{}", "-".repeat(50));
            for check in checks {
                println!(
                    "{:<6} {:<20} {:<8} {}",
                    check.sequence,
                    truncate(&check.id, 20),
                    if check.content_hash_valid { "ok" } else { "FAIL" },
                    if check.link_valid { "ok" } else { "FAIL" }
                );
            }
        }
    }

    if strict && !report.valid {
        std::process::exit(1);
    }

    Ok(())
}
