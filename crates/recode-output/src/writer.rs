//! Table writers.
//!
//! Every writer emits the header in `table.columns` order followed by one
//! line per row. Cells a row lacks are written as blanks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use serde_json::{Map, Number, Value};
use tracing::info;

use recode_model::{CellValue, Table, format_number};

use crate::error::OutputError;
use crate::format::{OutputFormat, SHEET_NAME};

/// Writes `table` to `path`, inferring the format from the extension when
/// `format` is `None`.
pub fn write_table(
    path: &Path,
    table: &Table,
    format: Option<OutputFormat>,
) -> Result<OutputFormat, OutputError> {
    let format = match format {
        Some(format) => format,
        None => OutputFormat::from_path(path).ok_or_else(|| OutputError::UnknownFormat {
            path: path.to_path_buf(),
        })?,
    };
    match format {
        OutputFormat::Xlsx => write_xlsx(path, table)?,
        OutputFormat::Csv => write_csv(path, table)?,
        OutputFormat::Json => write_json(path, table)?,
    }
    info!(
        path = %path.display(),
        format = %format,
        rows = table.len(),
        columns = table.columns.len(),
        "output written"
    );
    Ok(format)
}

/// One worksheet named `Processed Data`: bold header row, then the rows.
pub fn write_xlsx(path: &Path, table: &Table) -> Result<(), OutputError> {
    let xlsx_err = |source| OutputError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(xlsx_err)?;
    fill_worksheet(worksheet, table).map_err(|err| match err {
        FillError::TooLarge => OutputError::TooLarge {
            rows: table.len(),
            columns: table.columns.len(),
        },
        FillError::Xlsx(source) => xlsx_err(source),
    })?;
    workbook.save(path).map_err(xlsx_err)
}

enum FillError {
    TooLarge,
    Xlsx(rust_xlsxwriter::XlsxError),
}

impl From<rust_xlsxwriter::XlsxError> for FillError {
    fn from(source: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(source)
    }
}

fn fill_worksheet(worksheet: &mut Worksheet, table: &Table) -> Result<(), FillError> {
    let header_format = Format::new().set_bold();
    for (col, column) in table.columns.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| FillError::TooLarge)?;
        worksheet.write_string_with_format(0, col, column, &header_format)?;
    }
    for (index, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(index + 1).map_err(|_| FillError::TooLarge)?;
        for (col, column) in table.columns.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| FillError::TooLarge)?;
            match row.get(column) {
                CellValue::Number(number) if number.is_finite() => {
                    worksheet.write_number(row_num, col, *number)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_string(row_num, col, format_number(*number))?;
                }
                CellValue::Text(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                CellValue::Empty => {}
            }
        }
    }
    Ok(())
}

pub fn write_csv(path: &Path, table: &Table) -> Result<(), OutputError> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(&table.columns).map_err(csv_err)?;
    for row in &table.rows {
        writer
            .write_record(table.columns.iter().map(|column| row.get(column).to_string()))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-printed array of objects, keys in column order.
pub fn write_json(path: &Path, table: &Table) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &table_to_json(table)).map_err(|source| {
        OutputError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// JSON form of a table: one object per row, missing cells as `null`.
pub fn table_to_json(table: &Table) -> Value {
    Value::Array(
        table
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = table
                    .columns
                    .iter()
                    .map(|column| (column.clone(), cell_to_json(row.get(column))))
                    .collect();
                Value::Object(object)
            })
            .collect(),
    )
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Empty => Value::Null,
        CellValue::Text(text) => Value::String(text.clone()),
        CellValue::Number(number) => {
            if number.fract() == 0.0 && number.abs() < 9.007_199_254_740_992e15 {
                Value::Number(Number::from(*number as i64))
            } else {
                Number::from_f64(*number)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(format_number(*number)))
            }
        }
    }
}
