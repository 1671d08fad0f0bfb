//! Date column detection and normalization.
//!
//! A column is treated as a date column only when its name says so AND its
//! leading values look like date serials. Either signal alone is not enough:
//! a numeric `score` column is left alone, and so is a `birth_place` column
//! full of text. Callers can also exclude columns by name; the pipeline uses
//! this to keep the numeric date-of-birth parts out of detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use recode_model::{CellValue, Table};

use crate::datetime::{DateEpoch, format_serial_date, is_date_serial};

/// Name fragments that mark a column as date-like (matched case-insensitively).
pub const DEFAULT_DATE_TOKENS: [&str; 4] = ["ngày", "date", "birth", "sinh"];

/// Number of leading rows sampled per candidate column.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Options for date column detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOptions {
    /// Substrings searched for in the lowercased column name.
    pub name_tokens: Vec<String>,
    /// Leading rows inspected; more than half must be serials.
    pub sample_size: usize,
    /// Epoch used when formatting detected serials.
    pub epoch: DateEpoch,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            name_tokens: DEFAULT_DATE_TOKENS.iter().map(|t| (*t).to_string()).collect(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            epoch: DateEpoch::default(),
        }
    }
}

impl DateOptions {
    /// True if the column name contains one of the configured tokens.
    pub fn name_matches(&self, column: &str) -> bool {
        let lower = column.to_lowercase();
        self.name_tokens
            .iter()
            .filter(|token| !token.is_empty())
            .any(|token| lower.contains(&token.to_lowercase()))
    }
}

/// Columns holding date serials, in table column order.
///
/// Columns named in `excluded` are never reported.
pub fn detect_date_columns(
    table: &Table,
    options: &DateOptions,
    excluded: &[&str],
) -> Vec<String> {
    if table.is_empty() {
        return Vec::new();
    }
    let sample = options.sample_size.min(table.len());
    let mut detected = Vec::new();
    for column in &table.columns {
        if excluded.contains(&column.as_str()) || !options.name_matches(column) {
            continue;
        }
        let serials = table
            .column_values(column)
            .take(sample)
            .filter(|value| is_date_serial(value))
            .count();
        if serials * 2 > sample {
            debug!(column = %column, serials, sample, "detected date column");
            detected.push(column.clone());
        }
    }
    detected
}

/// Rewrites serial cells of the given columns as `dd/mm/yyyy` text.
///
/// Cells that are not serials (text dates, blanks, out-of-range numbers)
/// pass through unchanged.
pub fn normalize_date_columns(mut table: Table, columns: &[String], epoch: DateEpoch) -> Table {
    if columns.is_empty() {
        return table;
    }
    for row in &mut table.rows {
        for column in columns {
            let Some(cell) = row.cells.get_mut(column) else {
                continue;
            };
            if let CellValue::Number(serial) = *cell
                && is_date_serial(cell)
            {
                *cell = CellValue::Text(format_serial_date(serial, epoch));
            }
        }
    }
    table
}

/// Detects date columns and normalizes them in one pass.
///
/// Returns the normalized table and the detected columns.
pub fn normalize_dates(
    table: Table,
    options: &DateOptions,
    excluded: &[&str],
) -> (Table, Vec<String>) {
    let columns = detect_date_columns(&table, options, excluded);
    let table = normalize_date_columns(table, &columns, options.epoch);
    (table, columns)
}
