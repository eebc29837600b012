use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::{Compression, GzBuilder};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::Result;
use crate::table::Table;

/// Builds the published export artifacts for a players CSV. Two trees are
/// written under `<output_dir>/players/`: `full/` carrying every schema
/// field and `ids/` carrying only `*_id` columns. Each tree holds the four
/// serializations (CSV, pretty JSON, minified JSON, NDJSON) with gzipped
/// siblings, plus `by_id/` lookup maps keyed by every identifier column.
pub fn build_exports(csv_path: &Path, output_dir: &Path, fields: &[String]) -> Result<()> {
    let table = Table::read_file(csv_path)?;
    let records = table_to_records(&table, fields);

    let full_dir = output_dir.join("players").join("full");
    write_tree(&full_dir, &records, fields)?;

    let id_fields: Vec<String> = fields
        .iter()
        .filter(|f| f.ends_with("_id"))
        .cloned()
        .collect();
    let id_records: Vec<Map<String, Value>> = records
        .iter()
        .map(|record| {
            record
                .iter()
                .filter(|(key, _)| key.ends_with("_id"))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .collect();
    let ids_dir = output_dir.join("players").join("ids");
    write_tree(&ids_dir, &id_records, &id_fields)?;

    info!(
        "exported {} row(s) to {}",
        records.len(),
        output_dir.display()
    );
    Ok(())
}

/// Restricts each row to the schema fields present in the file, mapping empty
/// cells to JSON null. Fields the file lacks are omitted from the objects
/// (the CSV writer still emits them as empty columns).
fn table_to_records(table: &Table, fields: &[String]) -> Vec<Map<String, Value>> {
    let present: Vec<(&String, usize)> = fields
        .iter()
        .filter_map(|field| table.column_index(field).map(|index| (field, index)))
        .collect();

    table
        .rows
        .iter()
        .map(|row| {
            let mut record = Map::new();
            for (field, index) in &present {
                let cell = &row[*index];
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.clone())
                };
                record.insert((*field).clone(), value);
            }
            record
        })
        .collect()
}

fn write_tree(dir: &Path, records: &[Map<String, Value>], columns: &[String]) -> Result<()> {
    fs::create_dir_all(dir)?;

    let csv_text = records_to_csv(records, columns)?;
    write_with_gzip(dir.join("players.csv"), csv_text.as_bytes())?;

    let pretty = serde_json::to_string_pretty(records)?;
    write_with_gzip(dir.join("players.json"), pretty.as_bytes())?;

    let minified = serde_json::to_string(records)?;
    write_with_gzip(dir.join("players.min.json"), minified.as_bytes())?;

    let mut ndjson = String::new();
    for record in records {
        ndjson.push_str(&serde_json::to_string(record)?);
        ndjson.push('\n');
    }
    write_with_gzip(dir.join("players.ndjson"), ndjson.as_bytes())?;

    write_id_mappings(&dir.join("by_id"), records, columns)?;
    Ok(())
}

fn records_to_csv(records: &[Map<String, Value>], columns: &[String]) -> Result<String> {
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| match record.get(column) {
                    Some(Value::String(s)) => s.clone(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();
    let table = Table {
        headers: columns.to_vec(),
        rows,
    };
    table.to_csv_string()
}

/// One lookup map per identifier column: non-empty id value → full record.
/// Rows without the value are omitted; a column with no values at all
/// produces no files.
fn write_id_mappings(
    dir: &Path,
    records: &[Map<String, Value>],
    columns: &[String],
) -> Result<()> {
    fs::create_dir_all(dir)?;

    for id_field in columns.iter().filter(|c| c.ends_with("_id")) {
        let mut mapping = Map::new();
        for record in records {
            if let Some(Value::String(id_value)) = record.get(id_field) {
                if !id_value.is_empty() {
                    mapping.insert(id_value.clone(), Value::Object(record.clone()));
                }
            }
        }
        if mapping.is_empty() {
            continue;
        }

        let value = Value::Object(mapping);
        let pretty = serde_json::to_string_pretty(&value)?;
        write_with_gzip(dir.join(format!("players.{id_field}.json")), pretty.as_bytes())?;
        let minified = serde_json::to_string(&value)?;
        write_with_gzip(
            dir.join(format!("players.{id_field}.min.json")),
            minified.as_bytes(),
        )?;
    }
    Ok(())
}

/// Writes `bytes` to `path` and a gzipped copy to `path.gz`. The gzip header
/// carries mtime 0 so rebuilding unchanged data is byte-identical.
fn write_with_gzip(path: PathBuf, bytes: &[u8]) -> Result<()> {
    fs::write(&path, bytes)?;

    let mut gz_path = path.into_os_string();
    gz_path.push(".gz");
    let file = fs::File::create(PathBuf::from(gz_path))?;
    let mut encoder = GzBuilder::new().mtime(0).write(file, Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()?;
    Ok(())
}
