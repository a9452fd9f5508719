//! Snapshot rendering
//!
//! Turns one snapshot into the three backup payload formats:
//! - JSON: the structured document, also the restore input
//! - SQL: a replayable statement script, independent of the JSON path
//! - CSV: per-fiscal-year, per-fund extracts for spreadsheet tools

pub mod csv;
pub mod json;
pub mod sql;

pub use csv::{fiscal_fund_tables, COMBINED_TABLE, CSV_HEADERS};
