//! Prove command implementation.

use chainseal_merkle::MerkleTree;
use chainseal_store::read_entries;

pub fn run(entries_path: String, entry_id: String) -> Result<(), Box<dyn std::error::Error>> {
    let entries =
        read_entries(&entries_path).map_err(|e| format!("Failed to read entries: {}", e))?;
    let tree = MerkleTree::build(&entries)?;
    let proof = tree
        .proof(&entry_id)
        .ok_or_else(|| format!("Entry {} not found in {}", entry_id, entries_path))?;

    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(())
}
