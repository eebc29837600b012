use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};

use roster_tools::constants::{DEFAULT_CORE_SCHEMA, DEFAULT_PLAYERS_CSV};
use roster_tools::fetch::{download_csv, filter_columns};
use roster_tools::logging::init_logging;
use roster_tools::schema::SchemaFields;

/// Download a published Google Sheet tab and write it as schema-filtered CSV.
#[derive(Parser, Debug)]
#[command(name = "fetch-sheet", version, about = "Fetch a sheet tab as schema-filtered CSV")]
struct Cli {
    /// Spreadsheet identifier from the published sheet URL
    sheet_id: String,

    /// Tab identifier within the spreadsheet
    #[arg(long, default_value = "0")]
    gid: String,

    /// Core schema listing the canonical fields
    #[arg(long, default_value = DEFAULT_CORE_SCHEMA)]
    core_schema: PathBuf,

    /// Optional source schema contributing per-source id columns
    #[arg(long)]
    source_schema: Option<PathBuf>,

    /// Keep columns the schema does not name instead of dropping them
    #[arg(long)]
    include_unknown: bool,

    /// Where to write the filtered CSV
    #[arg(long, default_value = DEFAULT_PLAYERS_CSV)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Cli::parse();

    let schema = SchemaFields::load(&args.core_schema, args.source_schema.as_deref())
        .with_context(|| format!("Failed to load schema from {}", args.core_schema.display()))?;
    let fields = schema.all_fields();

    let csv_text = download_csv(&args.sheet_id, &args.gid)
        .await
        .with_context(|| format!("Failed to download sheet {}", args.sheet_id))?;
    let filtered = filter_columns(&csv_text, &fields, args.include_unknown)
        .context("Failed to filter downloaded CSV")?;

    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(&args.out, &filtered)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    println!("Wrote {}", args.out.display());
    Ok(())
}
