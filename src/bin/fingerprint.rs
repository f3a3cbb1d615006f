use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use audit_ledger::audit::{fingerprint, verify_integrity_value, BusinessFields};
use audit_ledger::compliance::{ComplianceScorer, RuleSet};

/// Fingerprint an audit record and optionally check it
#[derive(Parser, Debug)]
#[command(name = "fingerprint", version, about = "Compute and verify audit record fingerprints")]
struct Args {
    /// Path to a JSON audit record
    #[arg(short, long, value_name = "PATH")]
    record: PathBuf,

    /// Expected digest to verify against
    #[arg(short, long, value_name = "HASH")]
    expected: Option<String>,

    /// Hash the whole JSON document instead of the record's business fields
    #[arg(long)]
    raw: bool,

    /// Also run the compliance scorer
    #[arg(short, long)]
    score: bool,

    /// YAML rule file for --score
    #[arg(long, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let contents = std::fs::read_to_string(&args.record)
        .with_context(|| format!("Failed to read {:?}", args.record))?;
    let document: serde_json::Value =
        serde_json::from_str(&contents).context("Record is not valid JSON")?;

    let digest = if args.raw {
        fingerprint::fingerprint(&document)?
    } else {
        let fields: BusinessFields = serde_json::from_value(document.clone())
            .map_err(|e| anyhow!("Record is missing business fields: {}", e))?;
        fields.fingerprint()?
    };
    println!("{}", digest);

    if let Some(expected) = &args.expected {
        let valid = if args.raw {
            &digest == expected
        } else {
            verify_integrity_value(&document, expected)?
        };

        if !valid {
            error!("Digest mismatch: computed {}, expected {}", digest, expected);
            println!("✗ Integrity check failed");
            std::process::exit(1);
        }
        info!("Digest matches expected value");
        println!("✓ Integrity verified");
    }

    if args.score {
        let rules = match &args.rules {
            Some(path) => RuleSet::load_from_file(path)?,
            None => RuleSet::default(),
        };
        let fields: BusinessFields = serde_json::from_value(document)
            .map_err(|e| anyhow!("Record is missing business fields: {}", e))?;
        let result = ComplianceScorer::new(rules).score(&fields);
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
