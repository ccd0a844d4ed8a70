//! Schema-driven CSV parsing and INSERT/UPDATE classification

use super::record::{CsvRecord, RawRecord};
use shared::error::{AppError, ErrorCode};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Structural parse failures
///
/// These fail the whole upload before any row is processed. Row-level
/// problems are never reported here; see [`RowOutcome::Invalid`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file is empty or has no data rows")]
    EmptyInput,

    #[error("missing required columns: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    #[error("too many rows: {count} (limit {limit})")]
    TooManyRows { count: usize, limit: usize },

    #[error("malformed CSV header: {0}")]
    Header(String),
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        let code = match &err {
            ParseError::EmptyInput => ErrorCode::ImportEmptyFile,
            ParseError::SchemaMismatch { .. } => ErrorCode::ImportSchemaMismatch,
            ParseError::TooManyRows { .. } => ErrorCode::ImportTooManyRows,
            ParseError::Header(_) => ErrorCode::InvalidFormat,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Outcome of a single data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome<T> {
    Valid(T),
    Invalid { reason: String },
}

/// One parsed data row with its line number and outcome
#[derive(Debug, Clone)]
pub struct ParsedRow<T> {
    /// 1-based line number in the file (header is line 1)
    pub line: usize,
    pub outcome: RowOutcome<T>,
}

/// Result of parsing one upload: exactly one entry per data line, in input
/// order
#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    pub rows: Vec<ParsedRow<T>>,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl<T> ParseResult<T> {
    /// Valid typed rows, in input order
    pub fn valid_rows(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().filter_map(|r| match &r.outcome {
            RowOutcome::Valid(v) => Some(v),
            RowOutcome::Invalid { .. } => None,
        })
    }

    /// Consume the result, keeping only valid rows
    pub fn into_valid_rows(self) -> Vec<T> {
        self.rows
            .into_iter()
            .filter_map(|r| match r.outcome {
                RowOutcome::Valid(v) => Some(v),
                RowOutcome::Invalid { .. } => None,
            })
            .collect()
    }

    /// (line, reason) pairs for the error preview table
    pub fn errors(&self) -> Vec<(usize, &str)> {
        self.rows
            .iter()
            .filter_map(|r| match &r.outcome {
                RowOutcome::Invalid { reason } => Some((r.line, reason.as_str())),
                RowOutcome::Valid(_) => None,
            })
            .collect()
    }
}

/// Parse an upload with no row cap
pub fn parse<T: CsvRecord>(raw: &str) -> Result<ParseResult<T>, ParseError> {
    parse_with_limit(raw, None)
}

/// Parse an upload, optionally capping the number of data rows
///
/// The cap is structural: exceeding it rejects the whole file, mirroring the
/// empty-file and missing-header checks.
pub fn parse_with_limit<T: CsvRecord>(
    raw: &str,
    limit: Option<usize>,
) -> Result<ParseResult<T>, ParseError> {
    // Header plus at least one data row
    if raw.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(ParseError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::Header(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_uppercase())
        .collect();

    let missing: Vec<String> = T::REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::SchemaMismatch { missing });
    }

    // Positional index for every declared column present in the header
    let mut column_index: HashMap<&'static str, usize> = HashMap::new();
    for column in T::REQUIRED_COLUMNS.iter().chain(T::OPTIONAL_COLUMNS) {
        if let Some(idx) = headers.iter().position(|h| h == column) {
            column_index.insert(column, idx);
        }
    }

    let mut rows: Vec<ParsedRow<T>> = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();

    for (offset, record) in reader.records().enumerate() {
        let fallback_line = offset + 2;
        if let Some(limit) = limit
            && rows.len() >= limit
        {
            return Err(ParseError::TooManyRows {
                count: rows.len() + 1,
                limit,
            });
        }

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                rows.push(ParsedRow {
                    line: fallback_line,
                    outcome: RowOutcome::Invalid {
                        reason: format!("malformed row: {e}"),
                    },
                });
                continue;
            }
        };

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        let mut cells: HashMap<String, String> = HashMap::new();
        for (column, idx) in &column_index {
            let value = record.get(*idx).unwrap_or("").trim().to_string();
            cells.insert((*column).to_string(), value);
        }
        let raw_record = RawRecord::new(line, cells);

        let outcome = evaluate_row::<T>(&raw_record, &mut seen_keys);
        rows.push(ParsedRow { line, outcome });
    }

    let valid_count = rows
        .iter()
        .filter(|r| matches!(r.outcome, RowOutcome::Valid(_)))
        .count();
    let invalid_count = rows.len() - valid_count;

    tracing::debug!(
        total = rows.len(),
        valid = valid_count,
        invalid = invalid_count,
        "CSV upload parsed"
    );

    Ok(ParseResult {
        rows,
        valid_count,
        invalid_count,
    })
}

/// Apply the row-level checks in their fixed order; the first failing rule
/// wins
fn evaluate_row<T: CsvRecord>(raw: &RawRecord, seen_keys: &mut HashSet<String>) -> RowOutcome<T> {
    if T::REQUIRED_COLUMNS.iter().any(|c| raw.get(c).is_empty()) {
        return RowOutcome::Invalid {
            reason: "missing required fields".into(),
        };
    }

    // A row that later fails decode still claims its key: the checks run in
    // sequence, so a following duplicate is reported as a duplicate
    if !seen_keys.insert(T::dedup_key(raw)) {
        return RowOutcome::Invalid {
            reason: "duplicate key in file".into(),
        };
    }

    match T::decode(raw) {
        Ok(row) => RowOutcome::Valid(row),
        Err(reason) => RowOutcome::Invalid { reason },
    }
}

// =============================================================================
// INSERT/UPDATE classification
// =============================================================================

/// Write action for a valid row, relative to the existing-record snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Insert,
    Update,
}

/// A valid row tagged with its write action
#[derive(Debug, Clone)]
pub struct ActionRow<T> {
    pub line: usize,
    pub action: RowAction,
    pub row: T,
}

impl<T> ActionRow<T> {
    /// Convert the carried row, keeping line and action
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionRow<U> {
        ActionRow {
            line: self.line,
            action: self.action,
            row: f(self.row),
        }
    }
}

/// Counters shown in the diff preview before a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub to_insert: usize,
    pub to_update: usize,
    pub rejected: usize,
}

/// Tag each valid row INSERT or UPDATE against a pre-fetched key snapshot
///
/// MSL uploads skip this step; their commit model is delete-and-recreate per
/// category rather than a per-row upsert.
pub fn classify<T: CsvRecord + Clone>(
    result: &ParseResult<T>,
    existing_keys: &HashSet<String>,
) -> (Vec<ActionRow<T>>, DiffSummary) {
    let mut actions = Vec::with_capacity(result.valid_count);
    let mut summary = DiffSummary {
        rejected: result.invalid_count,
        ..DiffSummary::default()
    };

    for parsed in &result.rows {
        if let RowOutcome::Valid(row) = &parsed.outcome {
            let action = if existing_keys.contains(&row.entity_key()) {
                summary.to_update += 1;
                RowAction::Update
            } else {
                summary.to_insert += 1;
                RowAction::Insert
            };
            actions.push(ActionRow {
                line: parsed.line,
                action,
                row: row.clone(),
            });
        }
    }

    (actions, summary)
}
