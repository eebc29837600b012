use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use roster_tools::backfill::{backfill_file, BackfillOptions, BackfillOutcome};
use roster_tools::constants::{DEFAULT_DIGEST_BYTES, DEFAULT_ID_FIELD, DEFAULT_PLAYERS_CSV};
use roster_tools::logging::init_logging;

/// Fill in missing deterministic identifiers in the players CSV.
#[derive(Parser, Debug)]
#[command(name = "backfill-ids", version, about = "Backfill deterministic short identifiers")]
struct Cli {
    /// CSV file to update in place
    #[arg(long, default_value = DEFAULT_PLAYERS_CSV)]
    csv: PathBuf,

    /// Column holding the identifier
    #[arg(long, default_value = DEFAULT_ID_FIELD)]
    id_field: String,

    /// Fields hashed into the identifier, in order (defaults to the roster name/birth fields)
    #[arg(long = "id-fields", value_name = "FIELD", num_args = 1..)]
    id_fields: Option<Vec<String>>,

    /// Digest length in bytes
    #[arg(long, default_value_t = DEFAULT_DIGEST_BYTES, value_parser = clap::value_parser!(usize))]
    digest_bytes: usize,

    /// Prefix mixed into the hash input, e.g. a league code
    #[arg(long)]
    prefix: Option<String>,

    /// Regenerate identifiers even for rows that already have one
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Cli::parse();

    let mut options = BackfillOptions {
        id_field: args.id_field,
        digest_bytes: args.digest_bytes,
        prefix: args.prefix,
        force: args.force,
        ..BackfillOptions::default()
    };
    if let Some(fields) = args.id_fields {
        options.id_source_fields = fields;
    }

    let outcome = backfill_file(&args.csv, &options)
        .with_context(|| format!("Failed to backfill {}", args.csv.display()))?;
    match outcome {
        BackfillOutcome::Updated { rows_changed } => {
            println!(
                "Updated file: {} ({} row(s) filled)",
                args.csv.display(),
                rows_changed
            );
        }
        BackfillOutcome::Unchanged => {
            println!(
                "No missing {} values in {}",
                options.id_field,
                args.csv.display()
            );
        }
    }
    Ok(())
}
