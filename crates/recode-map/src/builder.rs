//! Mapping workbook to [`MappingSet`].
//!
//! Every sheet of the mapping workbook describes one source column (matched
//! by exact sheet name). Each row contributes a `value -> key` pair: cells in
//! the target column equal to `value` are rewritten to `key`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use recode_model::{MappingDict, MappingSet, Sheet, Workbook, redact_value};

use crate::error::MappingError;

/// Column holding the raw value to match.
pub const VALUE_FIELD: &str = "value";
/// Column holding the replacement.
pub const KEY_FIELD: &str = "key";

/// How repeated raw values inside one sheet are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The last row for a value wins.
    #[default]
    LastWins,
    /// A repeated value with a different key fails the build.
    Reject,
}

/// Per-sheet build statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetReport {
    pub sheet: String,
    /// Rows read from the sheet.
    pub rows: usize,
    /// Distinct values in the resulting dictionary.
    pub entries: usize,
    /// Rows skipped because `value` or `key` was absent.
    pub dropped: usize,
    /// Rows that replaced an earlier row for the same value.
    pub overwritten: usize,
}

/// Build statistics for a whole mapping workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    pub sheets: Vec<SheetReport>,
}

impl MappingReport {
    pub fn total_entries(&self) -> usize {
        self.sheets.iter().map(|s| s.entries).sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.sheets.iter().map(|s| s.dropped).sum()
    }

    pub fn total_overwritten(&self) -> usize {
        self.sheets.iter().map(|s| s.overwritten).sum()
    }
}

/// Builds a [`MappingSet`] from a mapping workbook.
#[derive(Debug, Clone, Default)]
pub struct MappingBuilder {
    duplicates: DuplicatePolicy,
}

impl MappingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Builds the set and a report of what each sheet contributed.
    ///
    /// Sheets without a single valid pair still produce an (empty) entry.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateValue`] under [`DuplicatePolicy::Reject`]
    /// when one sheet maps the same value to two different keys.
    pub fn build(&self, workbook: &Workbook) -> Result<(MappingSet, MappingReport), MappingError> {
        let mut dicts = Vec::with_capacity(workbook.sheets.len());
        let mut report = MappingReport::default();
        for sheet in &workbook.sheets {
            let (dict, sheet_report) = self.build_sheet(sheet)?;
            debug!(
                sheet = %sheet.name,
                rows = sheet_report.rows,
                entries = sheet_report.entries,
                dropped = sheet_report.dropped,
                "built mapping dictionary"
            );
            dicts.push((sheet.name.clone(), dict));
            report.sheets.push(sheet_report);
        }
        Ok((dicts.into_iter().collect(), report))
    }

    fn build_sheet(&self, sheet: &Sheet) -> Result<(MappingDict, SheetReport), MappingError> {
        let pairs = sheet_pairs(sheet);
        let mut report = SheetReport {
            sheet: sheet.name.clone(),
            rows: sheet.table.len(),
            dropped: sheet.table.len() - pairs.len(),
            ..SheetReport::default()
        };
        {
            let mut seen: HashMap<&str, &str> = HashMap::new();
            for (value, key) in &pairs {
                let Some(previous) = seen.insert(value, key) else {
                    continue;
                };
                if self.duplicates == DuplicatePolicy::Reject && previous != key.as_str() {
                    return Err(MappingError::DuplicateValue {
                        sheet: sheet.name.clone(),
                        value: value.clone(),
                        first_key: previous.to_string(),
                        second_key: key.clone(),
                    });
                }
                report.overwritten += 1;
                warn!(
                    sheet = %sheet.name,
                    value = redact_value(value),
                    "duplicate mapping value; later row wins"
                );
            }
        }
        let dict = MappingDict::from_pairs(pairs);
        report.entries = dict.len();
        Ok((dict, report))
    }
}

/// Builds a [`MappingSet`] with last-write-wins semantics and no report.
pub fn build_mapping_set(workbook: &Workbook) -> MappingSet {
    workbook
        .sheets
        .iter()
        .map(|sheet| (sheet.name.clone(), MappingDict::from_pairs(sheet_pairs(sheet))))
        .collect()
}

/// Valid `(value, key)` pairs of a sheet in row order.
fn sheet_pairs(sheet: &Sheet) -> Vec<(String, String)> {
    sheet
        .table
        .rows
        .iter()
        .filter_map(|row| {
            let value = row.get(VALUE_FIELD);
            let key = row.get(KEY_FIELD);
            if value.is_absent() || key.is_absent() {
                return None;
            }
            Some((value.lookup_key()?, key.lookup_key()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use recode_model::{CellValue, Row, Table};

    use super::*;

    fn pair(value: impl Into<CellValue>, key: impl Into<CellValue>) -> Row {
        Row::new().with(VALUE_FIELD, value).with(KEY_FIELD, key)
    }

    fn sheet(name: &str, rows: Vec<Row>) -> Sheet {
        let mut table = Table::new(vec![VALUE_FIELD.to_string(), KEY_FIELD.to_string()]);
        for row in rows {
            table.push_row(row);
        }
        Sheet::new(name, table)
    }

    #[test]
    fn drops_rows_with_absent_value_or_key() {
        let workbook = Workbook::from(sheet(
            "status",
            vec![
                pair("A", "Active"),
                pair("", "Ignored"),
                Row::new().with(VALUE_FIELD, "B"),
                pair("C", CellValue::Empty),
            ],
        ));
        let (set, report) = MappingBuilder::new().build(&workbook).unwrap();
        let dict = set.get("status").unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("A"), Some("Active"));
        assert_eq!(report.sheets[0].dropped, 3);
        assert_eq!(report.sheets[0].rows, 4);
    }

    #[test]
    fn numeric_pairs_use_lookup_keys() {
        let workbook = Workbook::from(sheet("gender", vec![pair(1_i64, "Male"), pair(0_i64, 9.5)]));
        let set = build_mapping_set(&workbook);
        let dict = set.get("gender").unwrap();
        assert_eq!(dict.get("1"), Some("Male"));
        assert_eq!(dict.get("0"), Some("9.5"));
    }

    #[test]
    fn zero_value_pair_is_kept() {
        let workbook = Workbook::from(sheet(
            "gender",
            vec![pair(0_i64, "Female"), pair(1_i64, "Male")],
        ));
        let (set, report) = MappingBuilder::new().build(&workbook).unwrap();
        let dict = set.get("gender").unwrap();
        assert_eq!(dict.get("0"), Some("Female"));
        assert_eq!(dict.lookup(&CellValue::Number(0.0)), Some("Female"));
        assert_eq!(report.sheets[0].dropped, 0);
    }

    #[test]
    fn reject_policy_fails_on_conflicting_duplicate() {
        let workbook = Workbook::from(sheet(
            "status",
            vec![pair("A", "Active"), pair("A", "Archived")],
        ));
        let err = MappingBuilder::new()
            .with_duplicate_policy(DuplicatePolicy::Reject)
            .build(&workbook)
            .unwrap_err();
        assert!(matches!(err, MappingError::DuplicateValue { ref value, .. } if value == "A"));
    }

    #[test]
    fn reject_policy_tolerates_identical_duplicate() {
        let workbook = Workbook::from(sheet(
            "status",
            vec![pair("A", "Active"), pair("A", "Active")],
        ));
        let (set, report) = MappingBuilder::new()
            .with_duplicate_policy(DuplicatePolicy::Reject)
            .build(&workbook)
            .unwrap();
        assert_eq!(set.get("status").unwrap().len(), 1);
        assert_eq!(report.sheets[0].overwritten, 1);
    }
}
