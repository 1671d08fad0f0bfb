//! Mapping workbook ingestion into per-column substitution dictionaries.

pub mod builder;
pub mod error;

pub use builder::{
    DuplicatePolicy, KEY_FIELD, MappingBuilder, MappingReport, SheetReport, VALUE_FIELD,
    build_mapping_set,
};
pub use error::MappingError;
