//! Check-proof command implementation.

use chainseal_merkle::MerkleProof;
use serde_json::json;

pub fn run(
    proof_path: String,
    root: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&proof_path)
        .map_err(|e| format!("Failed to read proof file: {}", e))?;
    let mut proof: MerkleProof =
        serde_json::from_str(&raw).map_err(|e| format!("Failed to parse proof: {}", e))?;
    if let Some(expected) = root {
        proof.root_hash = expected;
    }

    let valid = proof.verify();
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "entryId": proof.entry_id,
                "rootHash": proof.root_hash,
                "valid": valid,
            }))?
        );
    } else if valid {
        println!(
            "proof valid: {} is included under root {}",
            proof.entry_id, proof.root_hash
        );
    } else {
        println!("proof INVALID for {}", proof.entry_id);
    }

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}
