use std::path::Path;

use tracing::{debug, info};

use crate::constants::{DEFAULT_DIGEST_BYTES, DEFAULT_ID_FIELD, DEFAULT_ID_SOURCE_FIELDS};
use crate::error::{Result, RosterError};
use crate::short_id;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct BackfillOptions {
    /// Column receiving the identifier.
    pub id_field: String,
    /// Row fields hashed into the identifier, in order.
    pub id_source_fields: Vec<String>,
    pub digest_bytes: usize,
    pub prefix: Option<String>,
    /// Regenerate identifiers even for rows that already have one.
    pub force: bool,
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            id_source_fields: DEFAULT_ID_SOURCE_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            digest_bytes: DEFAULT_DIGEST_BYTES,
            prefix: None,
            force: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillOutcome {
    Updated { rows_changed: usize },
    Unchanged,
}

/// Assigns identifiers in place. The identifier column is inserted as the
/// first column when the table lacks it; rows whose identifier cell is empty
/// (or every row, under `force`) get a freshly computed identifier. Source
/// fields absent from the table hash as empty strings.
pub fn backfill_table(table: &mut Table, opts: &BackfillOptions) -> Result<BackfillOutcome> {
    let id_index = match table.column_index(&opts.id_field) {
        Some(index) => index,
        None => {
            table.headers.insert(0, opts.id_field.clone());
            for row in &mut table.rows {
                row.insert(0, String::new());
            }
            0
        }
    };

    let source_indices: Vec<Option<usize>> = opts
        .id_source_fields
        .iter()
        .map(|field| table.column_index(field))
        .collect();

    let mut rows_changed = 0;
    for (row_number, row) in table.rows.iter_mut().enumerate() {
        if !row[id_index].is_empty() && !opts.force {
            continue;
        }
        let values: Vec<&str> = source_indices
            .iter()
            .map(|index| index.map(|i| row[i].as_str()).unwrap_or(""))
            .collect();
        let id = short_id::generate(opts.prefix.as_deref(), &values, opts.digest_bytes)?;
        debug!("row {}: {} = {}", row_number, opts.id_field, id);
        row[id_index] = id;
        rows_changed += 1;
    }

    if rows_changed > 0 {
        Ok(BackfillOutcome::Updated { rows_changed })
    } else {
        Ok(BackfillOutcome::Unchanged)
    }
}

/// Backfills one file in place. The file is rewritten only when at least one
/// row changed, so an already-complete file keeps its bytes and mtime.
pub fn backfill_file(path: &Path, opts: &BackfillOptions) -> Result<BackfillOutcome> {
    let mut table = Table::read_file(path)?;
    if !table.has_header() {
        return Err(RosterError::Schema(format!(
            "{}: no header row",
            path.display()
        )));
    }

    let outcome = backfill_table(&mut table, opts)?;
    if let BackfillOutcome::Updated { rows_changed } = outcome {
        table.write_file(path)?;
        info!("{}: assigned {} identifier(s)", path.display(), rows_changed);
    }
    Ok(outcome)
}
