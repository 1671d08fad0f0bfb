//! Header normalization and table assembly shared by the readers.

use std::collections::HashSet;

use recode_model::{CellValue, Row, Table};

/// Header given to a column whose header cell is blank.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Trims, strips byte order marks and collapses inner whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Makes headers unique in order.
///
/// Blank headers become `__EMPTY`; a repeated header `name` becomes `name_1`,
/// `name_2`, ... skipping suffixes already taken.
pub fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut headers = Vec::new();
    for header in raw {
        let mut base = normalize_header(header.as_ref());
        if base.is_empty() {
            base = EMPTY_HEADER.to_string();
        }
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

/// Builds a table from a header row and data rows.
///
/// Rows with no value at all are skipped; empty cells are left out of the
/// row so they read back as [`CellValue::Empty`]; cells past the last header
/// are dropped.
pub fn assemble_table<R>(header: &[String], rows: R) -> Table
where
    R: IntoIterator<Item = Vec<CellValue>>,
{
    let columns = unique_headers(header);
    let mut table = Table::new(columns);
    for cells in rows {
        if cells.iter().all(CellValue::is_absent) {
            continue;
        }
        let row: Row = table
            .columns
            .iter()
            .zip(cells)
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(column, cell)| (column.clone(), cell))
            .collect();
        table.push_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_whitespace_and_bom_are_normalized() {
        assert_eq!(normalize_header("\u{feff} Ngày   sinh "), "Ngày sinh");
    }

    #[test]
    fn blank_and_repeated_headers_are_made_unique() {
        let headers = unique_headers(["name", "", "name", " ", "name_1", "name"]);
        assert_eq!(
            headers,
            vec!["name", "__EMPTY", "name_1", "__EMPTY_1", "name_1_1", "name_2"]
        );
    }

    #[test]
    fn blank_rows_are_skipped_and_short_rows_padded() {
        let header = vec!["a".to_string(), "b".to_string()];
        let table = assemble_table(
            &header,
            vec![
                vec![CellValue::text("1"), CellValue::text("2"), CellValue::text("extra")],
                vec![CellValue::Empty, CellValue::text("")],
                vec![CellValue::text("3")],
            ],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].get("b"), &CellValue::Empty);
    }
}
