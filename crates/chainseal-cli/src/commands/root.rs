//! Root command implementation.

use chainseal_merkle::WindowCommitment;
use chainseal_store::read_entries;

pub fn run(entries_path: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let entries =
        read_entries(&entries_path).map_err(|e| format!("Failed to read entries: {}", e))?;
    let commitment = WindowCommitment::over(&entries)
        .map_err(|e| format!("Failed to build commitment: {}", e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&commitment)?);
    } else {
        println!("root:      {}", commitment.root_hash);
        println!("algorithm: {}", commitment.algorithm);
        println!(
            "window:    {}..{} ({} entries)",
            commitment.start_sequence, commitment.end_sequence, commitment.entry_count
        );
        println!("head:      {}", commitment.head_content_hash);
    }

    Ok(())
}
