use std::path::PathBuf;

use recode_core::RunReport;
use recode_model::Table;
use recode_output::OutputFormat;

#[derive(Debug)]
pub struct RunResult {
    pub source: PathBuf,
    pub mapping: PathBuf,
    /// Written file, `None` on a dry run.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub table: Table,
    pub report: RunReport,
    pub preview_rows: usize,
}
