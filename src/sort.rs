use std::path::{Path, PathBuf};

use crate::error::{Result, RosterError};
use crate::table::Table;

/// Stable sort of the data rows by one column's trimmed, lower-cased value.
/// Rows with equal keys keep their original relative order; the header is
/// untouched.
pub fn sort_table(table: &mut Table, field: &str) -> Result<()> {
    let index = table
        .column_index(field)
        .ok_or_else(|| RosterError::FieldNotFound(field.to_string()))?;
    table
        .rows
        .sort_by_cached_key(|row| row[index].trim().to_lowercase());
    Ok(())
}

/// Sorts a delimited file by `field` and writes the result to `output`
/// (defaulting to overwriting the input). Returns the path written.
pub fn sort_file(input: &Path, field: &str, output: Option<&Path>) -> Result<PathBuf> {
    let mut table = Table::read_file(input)?;
    sort_table(&mut table, field)?;

    let out_path = output.unwrap_or(input);
    table.write_file(out_path)?;
    Ok(out_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_rows_case_insensitively_and_trimmed() {
        let mut table =
            Table::parse("id,name\n3,  Zeta\n1,alpha\n2,Beta\n").unwrap();
        sort_table(&mut table, "name").unwrap();

        let names: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "  Zeta"]);
        assert_eq!(table.headers, vec!["id", "name"]);
    }

    #[test]
    fn equal_keys_keep_original_order() {
        let mut table = Table::parse("id,name\n1,same\n2,SAME\n3,  same \n4,aaa\n").unwrap();
        sort_table(&mut table, "name").unwrap();

        let ids: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["4", "1", "2", "3"]);
    }

    #[test]
    fn unknown_field_is_reported() {
        let mut table = Table::parse("id,name\n1,a\n").unwrap();
        let err = sort_table(&mut table, "team").unwrap_err();
        assert!(matches!(err, RosterError::FieldNotFound(ref f) if f == "team"));
    }

    #[test]
    fn sort_file_defaults_to_overwriting_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");
        std::fs::write(&path, "prism_id,name\nzz,late\naa,early\n").unwrap();

        let written = sort_file(&path, "prism_id", None).unwrap();
        assert_eq!(written, path);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "prism_id,name\naa,early\nzz,late\n"
        );
    }

    #[test]
    fn sort_file_honors_a_separate_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        let original = "prism_id,name\nzz,late\naa,early\n";
        std::fs::write(&input, original).unwrap();

        sort_file(&input, "prism_id", Some(&output)).unwrap();
        assert_eq!(std::fs::read_to_string(&input).unwrap(), original);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "prism_id,name\naa,early\nzz,late\n"
        );
    }
}
