use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, RosterError};

/// One entry under the source schema's `players` key: an external identifier
/// column contributed by that source.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceField {
    pub id_field: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Field-name lists assembled from the schema documents.
///
/// The core schema carries an ordered `fields` mapping; the optional source
/// schema carries a `players` sequence of [`SourceField`] entries. Nothing
/// else in either document is interpreted here.
#[derive(Debug, Clone)]
pub struct SchemaFields {
    core: Vec<String>,
    sources: Vec<SourceField>,
}

impl SchemaFields {
    pub fn load(core_path: &Path, source_path: Option<&Path>) -> Result<Self> {
        let core = load_core_fields(core_path)?;
        let sources = match source_path {
            Some(path) => load_source_fields(path)?,
            None => Vec::new(),
        };
        Ok(Self { core, sources })
    }

    /// Core fields followed by every source identifier column, in schema
    /// order. This is the column set the sheet fetcher filters against.
    pub fn all_fields(&self) -> Vec<String> {
        let mut fields = self.core.clone();
        fields.extend(self.sources.iter().map(|s| s.id_field.clone()));
        fields
    }

    /// Core fields followed by the identifier columns of active sources only.
    /// The exports builder publishes this set.
    pub fn active_fields(&self) -> Vec<String> {
        let mut fields = self.core.clone();
        fields.extend(
            self.sources
                .iter()
                .filter(|s| s.active)
                .map(|s| s.id_field.clone()),
        );
        fields
    }
}

fn load_yaml(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Reads the ordered field names from a core schema document. The document's
/// top-level `fields` mapping may carry arbitrary per-field metadata; only the
/// key order matters to these tools.
fn load_core_fields(path: &Path) -> Result<Vec<String>> {
    let doc = load_yaml(path)?;
    let fields = doc.get("fields").ok_or_else(|| {
        RosterError::Schema(format!(
            "{}: missing top-level `fields` key",
            path.display()
        ))
    })?;
    let mapping = fields.as_mapping().ok_or_else(|| {
        RosterError::Schema(format!("{}: `fields` is not a mapping", path.display()))
    })?;

    mapping
        .keys()
        .map(|key| {
            key.as_str().map(str::to_string).ok_or_else(|| {
                RosterError::Schema(format!(
                    "{}: non-string field name in `fields`",
                    path.display()
                ))
            })
        })
        .collect()
}

fn load_source_fields(path: &Path) -> Result<Vec<SourceField>> {
    let doc = load_yaml(path)?;
    let players = doc.get("players").ok_or_else(|| {
        RosterError::Schema(format!(
            "{}: missing top-level `players` key",
            path.display()
        ))
    })?;
    Ok(serde_yaml::from_value(players.clone())?)
}
