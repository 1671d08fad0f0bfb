//! Reading spreadsheet and CSV files from disk.

use std::fs;

use recode_ingest::{IngestError, read_workbook};
use recode_model::CellValue;
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use tempfile::tempdir;

#[test]
fn reads_all_xlsx_sheets_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mapping.xlsx");

    let mut xlsx = XlsxWorkbook::new();
    let gender = xlsx.add_worksheet();
    gender.set_name("gender").unwrap();
    gender.write_string(0, 0, "value").unwrap();
    gender.write_string(0, 1, "key").unwrap();
    gender.write_number(1, 0, 1).unwrap();
    gender.write_string(1, 1, "Male").unwrap();
    gender.write_number(2, 0, 2).unwrap();
    gender.write_string(2, 1, "Female").unwrap();
    let status = xlsx.add_worksheet();
    status.set_name("status").unwrap();
    status.write_string(0, 0, "value").unwrap();
    status.write_string(0, 1, "key").unwrap();
    status.write_boolean(1, 0, true).unwrap();
    status.write_string(1, 1, "Yes").unwrap();
    xlsx.save(&path).unwrap();

    let workbook = read_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["gender", "status"]);

    let gender = &workbook.sheets[0].table;
    assert_eq!(gender.columns, vec!["value", "key"]);
    assert_eq!(gender.len(), 2);
    assert_eq!(gender.rows[0].get("value"), &CellValue::Number(1.0));
    assert_eq!(gender.rows[1].get("key"), &CellValue::text("Female"));

    let status = &workbook.sheets[1].table;
    assert_eq!(status.rows[0].get("value"), &CellValue::text("TRUE"));
}

#[test]
fn xlsx_blank_rows_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("source.xlsx");

    let mut xlsx = XlsxWorkbook::new();
    let sheet = xlsx.add_worksheet();
    sheet.write_string(0, 0, "name").unwrap();
    sheet.write_string(0, 1, "birth_date").unwrap();
    sheet.write_string(1, 0, "An").unwrap();
    sheet.write_number(1, 1, 32999).unwrap();
    sheet.write_string(3, 0, "Binh").unwrap();
    xlsx.save(&path).unwrap();

    let workbook = read_workbook(&path).unwrap();
    let table = &workbook.first_sheet().unwrap().table;
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].get("birth_date"), &CellValue::Number(32999.0));
    assert_eq!(table.rows[1].get("name"), &CellValue::text("Binh"));
    assert_eq!(table.rows[1].get("birth_date"), &CellValue::Empty);
}

#[test]
fn csv_becomes_single_sheet_named_after_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(
        &path,
        "\u{feff}name,gender,,gender\nAn,1,x,007\n,,,\nBinh,2,,\n",
    )
    .unwrap();

    let workbook = read_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["people"]);
    let table = &workbook.sheets[0].table;
    assert_eq!(table.columns, vec!["name", "gender", "__EMPTY", "gender_1"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].get("gender"), &CellValue::Number(1.0));
    assert_eq!(table.rows[0].get("gender_1"), &CellValue::text("007"));
    assert_eq!(table.rows[1].get("__EMPTY"), &CellValue::Empty);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "value,key\n").unwrap();
    let err = read_workbook(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.xlsx");
    let err = read_workbook(&path).unwrap_err();
    assert!(matches!(err, IngestError::Open { .. }));
    assert!(err.to_string().contains("missing.xlsx"));
}
