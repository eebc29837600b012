use std::fs;
use std::path::Path;

use crate::error::Result;

/// A delimited file held fully in memory: one ordered header row plus data
/// rows aligned to it. Name-based access goes through [`Table::column_index`];
/// rows themselves are plain cell vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses delimited text with a leading header row. A UTF-8 BOM before
    /// the header is tolerated. Ragged data rows are padded with empty cells
    /// (or truncated) to the header width.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim().is_empty() {
            return Ok(Self {
                headers: Vec::new(),
                rows: Vec::new(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn read_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Serializes the table back to delimited text (header first, quoting as
    /// needed).
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            writer.write_record(&self.headers)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        // The writer only ever emits the UTF-8 cells it was given.
        Ok(String::from_utf8(buf).expect("CSV writer produced invalid UTF-8"))
    }

    /// Writes the table to `path` in one shot; the file is only touched once
    /// the full serialization exists in memory.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let text = self.to_csv_string()?;
        fs::write(path, text)?;
        Ok(())
    }
}
