//! CSV decoding: one sheet named after the file stem.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use recode_model::{CellValue, Sheet, Table, Workbook, format_number};

use crate::error::IngestError;
use crate::header::assemble_table;

/// Reads a CSV file into a single-sheet workbook.
pub fn read_csv(path: &Path) -> Result<Workbook, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, e))?;
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    let sheet_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());

    let mut records = records.into_iter();
    let table = match records.next() {
        Some(header) => assemble_table(
            &header,
            records.map(|record| record.iter().map(|raw| parse_cell(raw)).collect()),
        ),
        None => Table::default(),
    };
    debug!(
        sheet = %sheet_name,
        rows = table.len(),
        columns = table.columns.len(),
        "decoded csv"
    );
    Ok(Workbook::from(Sheet::new(sheet_name, table)))
}

/// Infers a cell from CSV text.
///
/// Numbers are recognised only when their canonical form reproduces the
/// trimmed text, so `007`, `1e3` and `1.50` stay text.
pub fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(number) = trimmed.parse::<f64>()
        && number.is_finite()
        && format_number(number) == trimmed
    {
        return CellValue::Number(number);
    }
    CellValue::text(trimmed)
}
