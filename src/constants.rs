/// Shared defaults for the roster tools
/// These constants keep the CLI surfaces of the individual binaries in sync
/// with each other and with the schema documents.

/// Column holding the generated identifier.
pub const DEFAULT_ID_FIELD: &str = "prism_id";

/// Row fields hashed into the identifier, in canonical order.
pub const DEFAULT_ID_SOURCE_FIELDS: &[&str] = &[
    "last_name",
    "first_name",
    "middle_name",
    "birth_year",
    "birth_month",
    "birth_day",
];

/// Identifier digest size in bytes. Six bytes is 48 bits of entropy, short
/// enough to transcribe by hand.
pub const DEFAULT_DIGEST_BYTES: usize = 6;

/// The maintained roster file.
pub const DEFAULT_PLAYERS_CSV: &str = "data/mlb/players.csv";

/// Core schema document (ordered field names).
pub const DEFAULT_CORE_SCHEMA: &str = "schema/players.yaml";

/// Per-league source schema document (extra identifier columns).
pub const DEFAULT_SOURCE_SCHEMA: &str = "schema/leagues/mlb/sources.yaml";

/// CSV export endpoint for a published Google Sheet tab.
pub const SHEET_EXPORT_URL: &str =
    "https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}";
