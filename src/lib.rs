pub mod constants;
pub mod error;
pub mod logging;

pub mod backfill;
pub mod exports;
pub mod fetch;
pub mod schema;
pub mod short_id;
pub mod sort;
pub mod table;
