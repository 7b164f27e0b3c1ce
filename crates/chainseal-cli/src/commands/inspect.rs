//! Inspect command implementation.

use chainseal_store::read_entries;

use crate::output;

pub fn run(
    entries_path: String,
    json: bool,
    max_entries: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries =
        read_entries(&entries_path).map_err(|e| format!("Failed to read entries: {}", e))?;
    if let Some(max) = max_entries {
        entries.truncate(max);
    }

    if json {
        for entry in &entries {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        output::print_entry_table_header();
        for entry in &entries {
            println!("{}", output::format_entry_row(entry));
        }
    }

    Ok(())
}
