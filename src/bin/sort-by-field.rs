use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use roster_tools::constants::DEFAULT_ID_FIELD;
use roster_tools::logging::init_logging;
use roster_tools::sort::sort_file;

/// Sort a CSV file by one column, case-insensitively.
#[derive(Parser, Debug)]
#[command(name = "sort-by-field", version, about = "Stable-sort a CSV by one column")]
struct Cli {
    /// CSV file to sort
    input: PathBuf,

    /// Column to sort by
    #[arg(long, default_value = DEFAULT_ID_FIELD)]
    field: String,

    /// Write here instead of overwriting the input
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Cli::parse();

    let written = sort_file(&args.input, &args.field, args.output.as_deref())
        .with_context(|| format!("Failed to sort {}", args.input.display()))?;
    println!("Sorted CSV written to {}", written.display());
    Ok(())
}
