//! Output of transformed tables.
//!
//! - **format**: [`OutputFormat`] and extension inference
//! - **writer**: xlsx, csv and json writers
//! - **preview**: `comfy-table` rendering of the leading rows

pub mod error;
pub mod format;
pub mod preview;
pub mod writer;

pub use error::OutputError;
pub use format::{DEFAULT_OUTPUT_FILE, OutputFormat, SHEET_NAME};
pub use preview::{DEFAULT_PREVIEW_ROWS, preview_footer, preview_table, render_preview};
pub use writer::{table_to_json, write_csv, write_json, write_table, write_xlsx};
