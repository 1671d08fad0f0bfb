//! Workbook decoding via `calamine` (xlsx, xlsm, xlsb, xls, ods).

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use recode_model::{CellValue, Sheet, Table, Workbook};

use crate::error::IngestError;
use crate::header::assemble_table;

/// Reads every sheet of a spreadsheet file, in workbook order.
pub fn read_spreadsheet(path: &Path) -> Result<Workbook, IngestError> {
    let mut source = open_workbook_auto(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut workbook = Workbook::new();
    for name in source.sheet_names().to_owned() {
        let range = source
            .worksheet_range(&name)
            .map_err(|source| IngestError::Sheet {
                path: path.to_path_buf(),
                sheet: name.clone(),
                source,
            })?;
        let table = range_to_table(&range);
        debug!(
            sheet = %name,
            rows = table.len(),
            columns = table.columns.len(),
            "decoded sheet"
        );
        workbook.push_sheet(Sheet::new(name, table))?;
    }
    Ok(workbook)
}

/// First used row is the header; the rest are data rows.
fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };
    let header: Vec<String> = header.iter().map(header_text).collect();
    assemble_table(&header, rows.map(|row| row.iter().map(cell_value).collect()))
}

fn header_text(cell: &Data) -> String {
    match cell_value(cell) {
        CellValue::Empty => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::text(if *flag { "TRUE" } else { "FALSE" }),
        Data::DateTime(datetime) => CellValue::Number(datetime.as_f64()),
        Data::Error(error) => CellValue::Text(error.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
