//! Chainseal CLI - audit chain sealing, inspection, and verification.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check_proof, inspect, prove, root, seal, verify};

#[derive(Parser)]
#[command(name = "chainseal")]
#[command(about = "Tamper-evident audit chain sealing and verification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal draft entries into a hash-linked chain
    Seal {
        /// Path to JSONL draft entries
        drafts: String,
        /// Hash algorithm (sha256, sha384, sha512)
        #[arg(long, default_value = "sha256")]
        algorithm: String,
        /// Tenant label for logs
        #[arg(long, default_value = "default")]
        tenant: String,
        /// Write sealed entries to this file instead of stdout
        #[arg(long)]
        output: Option<String>,
        /// Sequence the first sealed entry should carry, to resume a chain
        #[arg(long)]
        resume_sequence: Option<u64>,
        /// Content hash of the last entry before the resume point
        #[arg(long)]
        resume_hash: Option<String>,
    },
    /// List sealed entries
    Inspect {
        /// Path to JSONL sealed entries
        entries: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Stop after reading N entries (default: unlimited)
        #[arg(long)]
        max_entries: Option<usize>,
    },
    /// Verify chain integrity and print a report
    Verify {
        /// Path to JSONL sealed entries
        entries: String,
        /// Tenant label for the report
        #[arg(long, default_value = "default")]
        tenant: String,
        /// Output report as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code if the chain is invalid
        #[arg(long)]
        strict: bool,
        /// Expected sequence of the window's first entry
        #[arg(long)]
        start_sequence: Option<u64>,
        /// Known content hash of the entry before the window
        #[arg(long)]
        prev_hash: Option<String>,
        /// Stop after verifying N entries (default: unlimited)
        #[arg(long)]
        max_entries: Option<usize>,
        /// Include per-entry check outcomes
        #[arg(long)]
        details: bool,
        /// Skip the timestamp order check
        #[arg(long)]
        no_timestamp_check: bool,
    },
    /// Compute the Merkle window commitment over sealed entries
    Root {
        /// Path to JSONL sealed entries
        entries: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit an inclusion proof for one entry
    Prove {
        /// Path to JSONL sealed entries
        entries: String,
        /// Entry identifier to prove
        #[arg(long)]
        entry: String,
    },
    /// Verify an inclusion proof file
    CheckProof {
        /// Path to a proof JSON file
        proof: String,
        /// Expected root hash; overrides the root carried in the proof
        #[arg(long)]
        root: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seal {
            drafts,
            algorithm,
            tenant,
            output,
            resume_sequence,
            resume_hash,
        } => seal::run(drafts, algorithm, tenant, output, resume_sequence, resume_hash),
        Commands::Inspect {
            entries,
            json,
            max_entries,
        } => inspect::run(entries, json, max_entries),
        Commands::Verify {
            entries,
            tenant,
            json,
            strict,
            start_sequence,
            prev_hash,
            max_entries,
            details,
            no_timestamp_check,
        } => verify::run(
            entries,
            tenant,
            json,
            strict,
            start_sequence,
            prev_hash,
            max_entries,
            details,
            no_timestamp_check,
        ),
        Commands::Root { entries, json } => root::run(entries, json),
        Commands::Prove { entries, entry } => prove::run(entries, entry),
        Commands::CheckProof { proof, root, json } => check_proof::run(proof, root, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
