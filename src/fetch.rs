use tracing::info;

use crate::constants::SHEET_EXPORT_URL;
use crate::error::{Result, RosterError};
use crate::table::Table;

pub fn sheet_export_url(sheet_id: &str, gid: &str) -> String {
    SHEET_EXPORT_URL
        .replace("{sheet_id}", sheet_id)
        .replace("{gid}", gid)
}

/// Downloads one published sheet tab as CSV text.
///
/// The body is decoded as UTF-8 no matter what charset the transport claims:
/// responses without an explicit charset commonly fall back to a legacy
/// single-byte encoding that corrupts non-ASCII names.
pub async fn download_csv(sheet_id: &str, gid: &str) -> Result<String> {
    let url = sheet_export_url(sheet_id, gid);
    info!("HTTP GET request to: {}", url);

    let client = reqwest::Client::new();
    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RosterError::Fetch(format!(
            "{url} returned status {status}"
        )));
    }

    let bytes = response.bytes().await?;
    info!("HTTP response: status={}, size={} bytes", status, bytes.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Restricts delimited text to the schema's columns, in schema order, with
/// empty strings for requested columns the source lacks. With
/// `include_unknown` the original column set is kept instead and rows pass
/// through unfiltered.
pub fn filter_columns(
    csv_text: &str,
    schema_fields: &[String],
    include_unknown: bool,
) -> Result<String> {
    let table = Table::parse(csv_text)?;
    if !table.has_header() {
        return Err(RosterError::Parse(
            "fetched document has no header row".to_string(),
        ));
    }

    let out_fields: Vec<String> = if include_unknown {
        table.headers.clone()
    } else {
        schema_fields.to_vec()
    };
    let indices: Vec<Option<usize>> = out_fields
        .iter()
        .map(|field| table.column_index(field))
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|index| index.map(|i| row[i].clone()).unwrap_or_default())
                .collect()
        })
        .collect();

    let filtered = Table {
        headers: out_fields,
        rows,
    };
    filtered.to_csv_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn builds_the_export_url() {
        assert_eq!(
            sheet_export_url("SHEET123", "7"),
            "https://docs.google.com/spreadsheets/d/SHEET123/export?format=csv&gid=7"
        );
    }

    #[test]
    fn keeps_only_schema_columns_in_schema_order() {
        let input = "name,team,age\nruth,yankees,28\ncobb,tigers,31\n";
        let out = filter_columns(input, &fields(&["age", "name"]), false).unwrap();
        assert_eq!(out, "age,name\n28,ruth\n31,cobb\n");
    }

    #[test]
    fn unknown_requested_column_is_empty_for_every_row() {
        let input = "name,team\nruth,yankees\ncobb,tigers\nyoung,spiders\n";
        let out = filter_columns(input, &fields(&["name", "retro_id"]), false).unwrap();
        assert_eq!(out, "name,retro_id\nruth,\ncobb,\nyoung,\n");
    }

    #[test]
    fn include_unknown_keeps_the_original_columns() {
        let input = "name,team,mystery\nruth,yankees,x\n";
        let out = filter_columns(input, &fields(&["name"]), true).unwrap();
        assert_eq!(out, "name,team,mystery\nruth,yankees,x\n");
    }

    #[test]
    fn headerless_input_is_a_parse_error() {
        let err = filter_columns("", &fields(&["name"]), false).unwrap_err();
        assert!(matches!(err, RosterError::Parse(_)));
    }
}
