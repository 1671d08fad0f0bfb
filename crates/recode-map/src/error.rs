//! Error types for mapping operations.

use std::fmt;

/// Errors from building a mapping set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The same raw value appears twice in one sheet and duplicates are rejected.
    DuplicateValue {
        sheet: String,
        value: String,
        first_key: String,
        second_key: String,
    },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateValue {
                sheet,
                value,
                first_key,
                second_key,
            } => write!(
                f,
                "sheet '{sheet}' maps '{value}' twice ('{first_key}' and '{second_key}')"
            ),
        }
    }
}

impl std::error::Error for MappingError {}
