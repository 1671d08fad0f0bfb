//! Value transformations applied to the source table.
//!
//! - **datetime**: date serial detection and `dd/mm/yyyy` formatting
//! - **date_columns**: name- and sample-based date column detection
//! - **row**: ordered row steps (substitution, date of birth, template id)

pub mod date_columns;
pub mod datetime;
pub mod row;

pub use date_columns::{
    DEFAULT_DATE_TOKENS, DEFAULT_SAMPLE_SIZE, DateOptions, detect_date_columns,
    normalize_date_columns, normalize_dates,
};
pub use datetime::{DateEpoch, format_serial_date, is_date_serial, to_display_date};
pub use row::{
    DateOfBirthStep, DerivedFieldOptions, RowContext, RowStep, RowTransformer, SubstitutionStep,
    TemplateIdStep, compose_dob,
};
