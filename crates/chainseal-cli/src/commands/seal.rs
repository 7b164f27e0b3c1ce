//! Seal command implementation.

use chainseal_canonical::HashAlgorithm;
use chainseal_core::{ChainBuilder, ChainState};
use chainseal_store::{read_drafts, JsonlWriter};
use tracing::info;

pub fn run(
    drafts_path: String,
    algorithm: String,
    tenant: String,
    output: Option<String>,
    resume_sequence: Option<u64>,
    resume_hash: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let algorithm: HashAlgorithm = algorithm
        .parse()
        .map_err(|e| format!("Invalid algorithm: {}", e))?;
    let drafts =
        read_drafts(&drafts_path).map_err(|e| format!("Failed to read drafts: {}", e))?;

    let state = match (resume_sequence, resume_hash) {
        (Some(sequence), hash) => ChainState::resume(sequence, hash, algorithm),
        (None, Some(_)) => return Err("--resume-hash requires --resume-sequence".into()),
        (None, None) => ChainState::new(algorithm),
    };

    let mut builder = ChainBuilder::resume(state);
    let entries = builder.build_entries(drafts)?;
    info!(tenant = %tenant, entries = entries.len(), "chain sealed");

    match output {
        Some(path) => {
            let mut writer = JsonlWriter::create(&path)
                .map_err(|e| format!("Failed to open output file: {}", e))?;
            for entry in &entries {
                writer.append(entry)?;
            }
            writer.finish()?;
            println!("Sealed {} entries to {}", entries.len(), path);
        }
        None => {
            for entry in &entries {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
    }

    Ok(())
}
