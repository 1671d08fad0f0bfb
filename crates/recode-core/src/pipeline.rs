//! End-to-end run over a source and a mapping workbook.
//!
//! # Stages
//!
//! 1. Pick the first sheet of the source workbook
//! 2. Detect and normalize date serial columns (the date-of-birth part
//!    fields are never treated as dates)
//! 3. Build the mapping dictionaries
//! 4. Transform every row
//!
//! Both workbooks are borrowed; a run holds no state afterwards.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, info_span};

use recode_map::{MappingBuilder, MappingReport};
use recode_model::{MappingSet, Table, Workbook};
use recode_transform::{RowTransformer, normalize_dates};

use crate::error::{InputKind, PipelineError};
use crate::options::PipelineOptions;

/// Statistics of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Name of the source sheet that was processed.
    pub source_sheet: String,
    pub rows: usize,
    /// Columns whose serials were rewritten as dates.
    pub date_columns: Vec<String>,
    pub mapping: MappingReport,
    /// Cells that matched a dictionary entry, whether or not the value changed.
    pub substitutions: usize,
    #[serde(skip)]
    pub duration: Duration,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: Table,
    pub mappings: MappingSet,
    pub report: RunReport,
}

pub struct Pipeline {
    options: PipelineOptions,
    transformer: RowTransformer,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        let transformer = RowTransformer::standard(options.derived.clone());
        Self {
            options,
            transformer,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs all stages.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::MissingInput`] if either workbook is `None`
    /// - [`PipelineError::EmptyWorkbook`] if the source has no sheets
    /// - [`PipelineError::Mapping`] if the mapping workbook is rejected
    pub fn run(
        &self,
        source: Option<&Workbook>,
        mapping: Option<&Workbook>,
    ) -> Result<PipelineOutput, PipelineError> {
        let source = source.ok_or(PipelineError::MissingInput(InputKind::Source))?;
        let mapping = mapping.ok_or(PipelineError::MissingInput(InputKind::Mapping))?;
        let sheet = source.first_sheet().ok_or(PipelineError::EmptyWorkbook)?;

        let run_span = info_span!("run", source_sheet = %sheet.name);
        let _run_guard = run_span.enter();
        let run_start = Instant::now();

        let (normalized, date_columns) = info_span!("dates").in_scope(|| {
            let start = Instant::now();
            let excluded = self.options.derived.dob_input_fields();
            let (table, columns) =
                normalize_dates(sheet.table.clone(), &self.options.dates, &excluded);
            info!(
                rows = table.len(),
                date_columns = columns.len(),
                duration_ms = start.elapsed().as_millis(),
                "date normalization complete"
            );
            (table, columns)
        });

        let (mappings, mapping_report) =
            info_span!("mapping").in_scope(|| -> Result<_, PipelineError> {
                let start = Instant::now();
                let built = MappingBuilder::new()
                    .with_duplicate_policy(self.options.mapping.duplicates)
                    .build(mapping)?;
                info!(
                    sheets = built.1.sheets.len(),
                    entries = built.1.total_entries(),
                    dropped = built.1.total_dropped(),
                    duration_ms = start.elapsed().as_millis(),
                    "mapping build complete"
                );
                Ok(built)
            })?;

        let (table, substitutions) = info_span!("transform").in_scope(|| {
            let start = Instant::now();
            let table = self.transformer.transform_table(&normalized, &mappings);
            let substitutions = count_substitutions(&normalized, &mappings);
            info!(
                rows = table.len(),
                substitutions,
                duration_ms = start.elapsed().as_millis(),
                "row transformation complete"
            );
            (table, substitutions)
        });

        let report = RunReport {
            source_sheet: sheet.name.clone(),
            rows: table.len(),
            date_columns,
            mapping: mapping_report,
            substitutions,
            duration: run_start.elapsed(),
        };
        info!(
            rows = report.rows,
            substitutions = report.substitutions,
            duration_ms = report.duration.as_millis(),
            "run complete"
        );
        Ok(PipelineOutput {
            table,
            mappings,
            report,
        })
    }
}

/// Cells found in their column's dictionary.
fn count_substitutions(table: &Table, mappings: &MappingSet) -> usize {
    table
        .rows
        .iter()
        .flat_map(|row| &row.cells)
        .filter(|(column, value)| {
            mappings
                .get(column)
                .is_some_and(|dict| dict.lookup(value).is_some())
        })
        .count()
}
