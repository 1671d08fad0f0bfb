//! Data model shared by the recode crates.
//!
//! - **cell**: the tagged [`CellValue`] scalar and its lookup-key form
//! - **table**: [`Row`], [`Table`], [`Sheet`] and [`Workbook`]
//! - **mapping**: per-column substitution dictionaries ([`MappingDict`], [`MappingSet`])
//! - **redact**: switch controlling whether cell values may appear in logs

pub mod cell;
pub mod error;
pub mod mapping;
pub mod redact;
pub mod table;

pub use cell::{CellValue, format_number};
pub use error::{ModelError, Result};
pub use mapping::{MappingDict, MappingSet};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data_enabled};
pub use table::{Row, Sheet, Table, Workbook};
