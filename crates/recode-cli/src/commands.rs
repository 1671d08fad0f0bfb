use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use recode_core::{Pipeline, PipelineOptions};
use recode_ingest::read_workbook;
use recode_map::{MappingBuilder, MappingReport};
use recode_model::MappingSet;
use recode_output::{DEFAULT_OUTPUT_FILE, OutputFormat, write_table};

use crate::cli::{MappingsArgs, RunArgs};
use crate::types::RunResult;

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let run_span = info_span!(
        "recode",
        source = %args.source.display(),
        mapping = %args.mapping.display()
    );
    let _run_guard = run_span.enter();

    let options = load_options(args.config.as_deref())?;
    let source = read_workbook(&args.source)
        .with_context(|| format!("read source {}", args.source.display()))?;
    let mapping = read_workbook(&args.mapping)
        .with_context(|| format!("read mapping {}", args.mapping.display()))?;

    let output = Pipeline::new(options)
        .run(Some(&source), Some(&mapping))
        .context("transform source rows")?;

    let (path, format) = output_target(args)?;
    let written = if args.dry_run {
        info!(path = %path.display(), "dry run; output not written");
        None
    } else {
        write_table(&path, &output.table, Some(format))
            .with_context(|| format!("write {}", path.display()))?;
        Some(path)
    };

    Ok(RunResult {
        source: args.source.clone(),
        mapping: args.mapping.clone(),
        output: written,
        format,
        table: output.table,
        report: output.report,
        preview_rows: args.preview,
    })
}

pub fn run_mappings(args: &MappingsArgs) -> Result<(MappingSet, MappingReport)> {
    let options = load_options(args.config.as_deref())?;
    let workbook = read_workbook(&args.mapping)
        .with_context(|| format!("read mapping {}", args.mapping.display()))?;
    MappingBuilder::new()
        .with_duplicate_policy(options.mapping.duplicates)
        .build(&workbook)
        .with_context(|| format!("build mappings from {}", args.mapping.display()))
}

fn load_options(config: Option<&Path>) -> Result<PipelineOptions> {
    match config {
        Some(path) => PipelineOptions::load(path).context("load config"),
        None => Ok(PipelineOptions::default()),
    }
}

/// Output path and format.
///
/// An explicit `--format` wins; otherwise the format follows the `--output`
/// extension. Without `--output` the file is `processed_data.<ext>` beside
/// the source.
fn output_target(args: &RunArgs) -> Result<(PathBuf, OutputFormat)> {
    let explicit = args.format.map(OutputFormat::from);
    match &args.output {
        Some(path) => {
            let format = match explicit {
                Some(format) => format,
                None => OutputFormat::from_path(path).with_context(|| {
                    format!(
                        "cannot infer output format from {}; pass --format",
                        path.display()
                    )
                })?,
            };
            Ok((path.clone(), format))
        }
        None => {
            let format = explicit.unwrap_or_default();
            let file = Path::new(DEFAULT_OUTPUT_FILE).with_extension(format.extension());
            let dir = args.source.parent().unwrap_or_else(|| Path::new(""));
            Ok((dir.join(file), format))
        }
    }
}
