//! Source and mapping file decoding.
//!
//! [`read_workbook`] picks a reader from the file extension:
//!
//! - `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`: every sheet via `calamine`
//! - `.csv`: a single sheet named after the file stem
//!
//! The first used row of a sheet is its header.

pub mod csv_reader;
pub mod error;
pub mod header;
pub mod spreadsheet;

use std::path::Path;

use tracing::info;

use recode_model::Workbook;

pub use csv_reader::{parse_cell, read_csv};
pub use error::IngestError;
pub use header::{EMPTY_HEADER, normalize_header, unique_headers};
pub use spreadsheet::read_spreadsheet;

/// Input file kinds understood by [`read_workbook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Decodes a workbook, choosing the reader from the file extension.
pub fn read_workbook(path: &Path) -> Result<Workbook, IngestError> {
    let format = SourceFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let workbook = match format {
        SourceFormat::Spreadsheet => read_spreadsheet(path)?,
        SourceFormat::Csv => read_csv(path)?,
    };
    info!(
        path = %path.display(),
        sheets = workbook.sheets.len(),
        "workbook loaded"
    );
    Ok(workbook)
}
