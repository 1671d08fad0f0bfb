//! CLI argument definitions for the recode tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use recode_output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "recode",
    version,
    about = "Recode spreadsheet values through per-column mapping tables",
    long_about = "Recode spreadsheet values through per-column mapping tables.\n\n\
                  Each sheet of the mapping workbook is named after a source column and\n\
                  lists `value` -> `key` pairs. Date serial columns are rewritten as\n\
                  dd/mm/yyyy and `dob` / `attendant_template_id` fields are derived."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a source workbook with a mapping workbook.
    Run(RunArgs),

    /// List the dictionaries a mapping workbook defines.
    Mappings(MappingsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Source workbook (.xlsx, .xls, .ods, .csv); the first sheet is used.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Mapping workbook, one sheet per column to recode.
    #[arg(value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// Output file (default: processed_data.<ext> next to SOURCE).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: inferred from --output, else xlsx).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Number of rows to preview.
    #[arg(long = "preview", value_name = "N", default_value_t = recode_output::DEFAULT_PREVIEW_ROWS)]
    pub preview: usize,

    /// Transform and preview without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// TOML file with pipeline options.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MappingsArgs {
    /// Mapping workbook to inspect.
    #[arg(value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// TOML options file; its `[mapping]` section sets the duplicate policy.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Xlsx,
    Csv,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Xlsx => Self::Xlsx,
            OutputFormatArg::Csv => Self::Csv,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
