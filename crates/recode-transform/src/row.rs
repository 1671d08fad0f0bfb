//! Row transformation with ordered step execution.
//!
//! Each step implements [`RowStep`] and receives the row produced by the
//! previous step. The order is part of the contract:
//!
//! 1. **SubstitutionStep** - rewrite cells through their column's dictionary
//! 2. **DateOfBirthStep** - compose `dob` from the substituted year/month/day
//! 3. **TemplateIdStep** - resolve the raw template field through its own dictionary
//!
//! No step fails on missing columns; absent data degrades to "keep the
//! original value" or an empty string.

use serde::{Deserialize, Serialize};
use tracing::trace;

use recode_model::{CellValue, MappingSet, Row, Table, redact_value};

/// Names of the fields read and written by the derived-field steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedFieldOptions {
    pub year_field: String,
    pub month_field: String,
    pub day_field: String,
    /// Output field holding the composed `yyyy-mm-dd` date of birth.
    pub dob_field: String,
    /// Source field holding the raw template value.
    pub template_field: String,
    /// Mapping sheet used to resolve the template value.
    pub template_sheet: String,
    /// Output field holding the resolved template identifier.
    pub template_id_field: String,
}

impl Default for DerivedFieldOptions {
    fn default() -> Self {
        Self {
            year_field: "birthday_year".to_string(),
            month_field: "birthday_month".to_string(),
            day_field: "birthday_day".to_string(),
            dob_field: "dob".to_string(),
            template_field: "attendant_template".to_string(),
            template_sheet: "attendant_template".to_string(),
            template_id_field: "attendant_template_id".to_string(),
        }
    }
}

impl DerivedFieldOptions {
    /// Source fields the date of birth is composed from.
    pub fn dob_input_fields(&self) -> [&str; 3] {
        [&self.year_field, &self.month_field, &self.day_field]
    }

    /// Output fields appended after the source columns, in order.
    pub fn output_fields(&self) -> [&str; 2] {
        [&self.dob_field, &self.template_id_field]
    }
}

/// Read-only inputs shared by every step of one row.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// The row as it entered the transformer, before any step ran.
    pub source: &'a Row,
    pub mappings: &'a MappingSet,
    pub fields: &'a DerivedFieldOptions,
}

/// A single step of the row transformation.
pub trait RowStep: Send + Sync {
    /// Produces the next row from the previous step's output.
    fn apply(&self, row: Row, ctx: &RowContext<'_>) -> Row;

    /// Human-readable name for this step (for logging/debugging).
    fn step_name(&self) -> &str;
}

/// Step 1: replace cells found in their column's dictionary.
pub struct SubstitutionStep;

impl RowStep for SubstitutionStep {
    fn apply(&self, mut row: Row, ctx: &RowContext<'_>) -> Row {
        for (column, cell) in &mut row.cells {
            let Some(dict) = ctx.mappings.get(column) else {
                continue;
            };
            let Some(key) = dict.lookup(cell) else {
                continue;
            };
            trace!(
                column = %column,
                from = redact_value(&cell.to_string()),
                to = redact_value(key),
                "substituted value"
            );
            *cell = CellValue::Text(key.to_string());
        }
        row
    }

    fn step_name(&self) -> &str {
        "substitution"
    }
}

/// Step 2: compose the date of birth from year, month and day fields.
pub struct DateOfBirthStep;

impl RowStep for DateOfBirthStep {
    fn apply(&self, mut row: Row, ctx: &RowContext<'_>) -> Row {
        let fields = ctx.fields;
        let dob = compose_dob(
            row.get(&fields.year_field),
            row.get(&fields.month_field),
            row.get(&fields.day_field),
        );
        row.set(fields.dob_field.clone(), CellValue::Text(dob));
        row
    }

    fn step_name(&self) -> &str {
        "date_of_birth"
    }
}

/// Step 3: resolve the template identifier.
///
/// Reads the template field from the untouched source row, so a generic
/// substitution of the same column in step 1 is never applied twice.
pub struct TemplateIdStep;

impl RowStep for TemplateIdStep {
    fn apply(&self, mut row: Row, ctx: &RowContext<'_>) -> Row {
        let fields = ctx.fields;
        let raw = ctx.source.get(&fields.template_field);
        let resolved = ctx
            .mappings
            .get(&fields.template_sheet)
            .and_then(|dict| dict.lookup(raw))
            .map_or_else(|| raw.clone(), CellValue::text);
        row.set(fields.template_id_field.clone(), resolved);
        row
    }

    fn step_name(&self) -> &str {
        "template_id"
    }
}

/// `yyyy-mm-dd`, or an empty string when any part is falsy.
pub fn compose_dob(year: &CellValue, month: &CellValue, day: &CellValue) -> String {
    if year.is_falsy() || month.is_falsy() || day.is_falsy() {
        return String::new();
    }
    let year = year.to_string();
    let month = month.to_string();
    let day = day.to_string();
    format!("{}-{:0>2}-{:0>2}", year.trim(), month.trim(), day.trim())
}

/// An ordered list of row steps.
pub struct RowTransformer {
    steps: Vec<Box<dyn RowStep>>,
    fields: DerivedFieldOptions,
}

impl Default for RowTransformer {
    fn default() -> Self {
        Self::standard(DerivedFieldOptions::default())
    }
}

impl RowTransformer {
    /// Create a transformer with no steps.
    pub fn new(fields: DerivedFieldOptions) -> Self {
        Self {
            steps: Vec::new(),
            fields,
        }
    }

    /// Substitution, date of birth, template identifier.
    pub fn standard(fields: DerivedFieldOptions) -> Self {
        Self::new(fields)
            .add_step(Box::new(SubstitutionStep))
            .add_step(Box::new(DateOfBirthStep))
            .add_step(Box::new(TemplateIdStep))
    }

    /// Add a step to the end of the pipeline.
    #[must_use]
    pub fn add_step(mut self, step: Box<dyn RowStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    pub fn fields(&self) -> &DerivedFieldOptions {
        &self.fields
    }

    /// Runs every step over one row.
    pub fn transform(&self, source: &Row, mappings: &MappingSet) -> Row {
        let ctx = RowContext {
            source,
            mappings,
            fields: &self.fields,
        };
        self.steps
            .iter()
            .fold(source.clone(), |row, step| step.apply(row, &ctx))
    }

    /// Transforms every row; the derived fields are appended to the header.
    ///
    /// Output rows match input rows one to one, in order.
    pub fn transform_table(&self, table: &Table, mappings: &MappingSet) -> Table {
        let mut out = Table::new(table.columns.clone());
        for field in self.fields.output_fields() {
            out.ensure_column(field);
        }
        out.rows = table
            .rows
            .iter()
            .map(|row| self.transform(row, mappings))
            .collect();
        out
    }
}

#[cfg(test)]
mod tests {
    use recode_model::MappingDict;

    use super::*;

    fn status_mappings() -> MappingSet {
        [(
            "status",
            MappingDict::from_pairs([("A", "Active"), ("B", "Blocked")]),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn substitutes_known_values_and_keeps_unknown() {
        let transformer = RowTransformer::default();
        let mappings = status_mappings();

        let hit = transformer.transform(&Row::new().with("status", "A"), &mappings);
        assert_eq!(hit.get("status"), &CellValue::text("Active"));

        let miss = transformer.transform(&Row::new().with("status", "Z"), &mappings);
        assert_eq!(miss.get("status"), &CellValue::text("Z"));
    }

    #[test]
    fn empty_cells_are_never_substituted() {
        let mappings: MappingSet = [("status", MappingDict::from_pairs([("", "Blank")]))]
            .into_iter()
            .collect();
        let out = RowTransformer::default()
            .transform(&Row::new().with("status", CellValue::Empty), &mappings);
        assert_eq!(out.get("status"), &CellValue::Empty);
    }

    #[test]
    fn composes_zero_padded_dob() {
        let row = Row::new()
            .with("birthday_year", 1990_i64)
            .with("birthday_month", 5_i64)
            .with("birthday_day", 3_i64);
        let out = RowTransformer::default().transform(&row, &MappingSet::empty());
        assert_eq!(out.get("dob"), &CellValue::text("1990-05-03"));
    }

    #[test]
    fn dob_is_empty_when_a_part_is_missing_or_zero() {
        let missing_day = Row::new()
            .with("birthday_year", 1990_i64)
            .with("birthday_month", 5_i64);
        let zero_month = missing_day
            .clone()
            .with("birthday_month", 0_i64)
            .with("birthday_day", 3_i64);
        let transformer = RowTransformer::default();
        for row in [missing_day, zero_month] {
            let out = transformer.transform(&row, &MappingSet::empty());
            assert_eq!(out.get("dob"), &CellValue::text(""));
        }
    }

    #[test]
    fn dob_uses_substituted_parts() {
        let mappings: MappingSet = [(
            "birthday_month",
            MappingDict::from_pairs([("May", "5")]),
        )]
        .into_iter()
        .collect();
        let row = Row::new()
            .with("birthday_year", "1990")
            .with("birthday_month", "May")
            .with("birthday_day", "3");
        let out = RowTransformer::default().transform(&row, &mappings);
        assert_eq!(out.get("dob"), &CellValue::text("1990-05-03"));
    }

    #[test]
    fn template_id_copies_raw_value_without_dictionary() {
        let transformer = RowTransformer::default();
        for raw in [CellValue::text("T-1"), CellValue::text(""), CellValue::Number(7.0)] {
            let row = Row::new().with("attendant_template", raw.clone());
            let out = transformer.transform(&row, &MappingSet::empty());
            assert_eq!(out.get("attendant_template_id"), &raw);
        }
    }

    #[test]
    fn template_id_resolves_through_raw_source_value() {
        // The generic step rewrites the column itself; the identifier must be
        // resolved from the raw value, not from the already substituted one.
        let mappings: MappingSet = [(
            "attendant_template",
            MappingDict::from_pairs([("Nurse", "TPL-01"), ("TPL-01", "WRONG")]),
        )]
        .into_iter()
        .collect();
        let row = Row::new().with("attendant_template", "Nurse");
        let out = RowTransformer::default().transform(&row, &mappings);
        assert_eq!(out.get("attendant_template"), &CellValue::text("TPL-01"));
        assert_eq!(out.get("attendant_template_id"), &CellValue::text("TPL-01"));

        let unknown = Row::new().with("attendant_template", "Doctor");
        let out = RowTransformer::default().transform(&unknown, &mappings);
        assert_eq!(out.get("attendant_template_id"), &CellValue::text("Doctor"));
    }

    #[test]
    fn standard_step_order() {
        assert_eq!(
            RowTransformer::default().step_names(),
            vec!["substitution", "date_of_birth", "template_id"]
        );
    }

    #[test]
    fn derived_columns_are_appended_once() {
        let mut table = Table::new(vec!["status".to_string(), "dob".to_string()]);
        table.push_row(Row::new().with("status", "A"));
        let out = RowTransformer::default().transform_table(&table, &status_mappings());
        assert_eq!(out.columns, vec!["status", "dob", "attendant_template_id"]);
        assert_eq!(out.len(), 1);
    }
}
