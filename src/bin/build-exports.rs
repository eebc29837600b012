use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use roster_tools::constants::{DEFAULT_CORE_SCHEMA, DEFAULT_SOURCE_SCHEMA};
use roster_tools::exports::build_exports;
use roster_tools::logging::init_logging;
use roster_tools::schema::SchemaFields;

/// Build the published export trees (CSV, JSON, NDJSON, gzipped siblings)
/// from the players CSV.
#[derive(Parser, Debug)]
#[command(name = "build-exports", version, about = "Build players export artifacts")]
struct Cli {
    /// Players CSV to export
    csv: PathBuf,

    /// Directory receiving the export trees
    output_dir: PathBuf,

    /// Core schema listing the canonical fields
    #[arg(long, default_value = DEFAULT_CORE_SCHEMA)]
    core_schema: PathBuf,

    /// Source schema contributing per-source id columns
    #[arg(long, default_value = DEFAULT_SOURCE_SCHEMA)]
    source_schema: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Cli::parse();

    let schema = SchemaFields::load(&args.core_schema, Some(&args.source_schema))
        .with_context(|| format!("Failed to load schema from {}", args.core_schema.display()))?;
    let fields = schema.active_fields();

    build_exports(&args.csv, &args.output_dir, &fields)
        .with_context(|| format!("Failed to export {}", args.csv.display()))?;
    println!("Build complete. Outputs written to {}", args.output_dir.display());
    Ok(())
}
