//! CSV Reconciliation Engine
//!
//! Parses delimited uploads into typed rows, validates each row, classifies
//! valid rows as INSERT/UPDATE against a snapshot of existing keys, and
//! serializes MSL exports.
//!
//! Structural problems (empty file, missing required columns) fail the whole
//! parse before any row is processed. Row-level problems never fail the
//! call; they are collected as [`RowOutcome::Invalid`] entries so the caller
//! can render a preview table with inline reasons.
//!
//! Parsing uses a conformant CSV reader, so quoted fields may contain
//! embedded delimiters. The legacy uploader split on commas and could not
//! represent such fields; files it produced parse identically here.

pub mod export;
pub mod parser;
pub mod record;
pub mod rows;

pub use export::{export_msl, msl_export_filename};
pub use parser::{
    ActionRow, DiffSummary, ParseError, ParseResult, ParsedRow, RowAction, RowOutcome, classify,
    parse, parse_with_limit,
};
pub use record::{CsvRecord, RawRecord};
pub use rows::{MslRow, OutletRow, ProductRow};
