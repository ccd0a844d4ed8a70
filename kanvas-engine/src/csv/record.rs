//! Raw records and the schema trait for CSV uploads

use std::collections::HashMap;

/// One data row of an upload, resolved to declared column names
///
/// Header names are uppercased and cells trimmed at parse time, so decoders
/// look columns up by their canonical uppercase name. Missing optional
/// columns read as the empty string.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// 1-based line number in the uploaded file (header is line 1)
    pub line: usize,
    cells: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(line: usize, cells: HashMap<String, String>) -> Self {
        Self { line, cells }
    }

    /// Cell value for a declared column, empty string if absent
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Cell value as `Some(..)` only when non-empty
    pub fn get_opt(&self, column: &str) -> Option<&str> {
        let v = self.get(column);
        (!v.is_empty()).then_some(v)
    }
}

/// Schema of one upload variant: column sets plus the typed decode step
///
/// Implementors declare which columns must be present in the header, the
/// composite key used for in-file deduplication, and how a raw record
/// decodes into a typed domain row. `decode` reports the first failing rule
/// only; the parser never accumulates multiple reasons per row.
pub trait CsvRecord: Sized {
    /// Columns that must appear in the header (parse fails structurally
    /// otherwise) and must be non-empty in every data row
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Columns resolved when present, defaulting to empty cells otherwise
    const OPTIONAL_COLUMNS: &'static [&'static str];

    /// Composite dedup key within one upload batch (e.g. category + SKU)
    fn dedup_key(raw: &RawRecord) -> String;

    /// Decode and validate a raw record; `Err` carries the row-level reason
    fn decode(raw: &RawRecord) -> Result<Self, String>;

    /// Key compared against the existing-record snapshot for INSERT/UPDATE
    /// classification
    fn entity_key(&self) -> String;
}
