use std::fmt;
use std::path::PathBuf;

use recode_map::MappingError;

/// Which of the two run inputs a [`PipelineError::MissingInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Source,
    Mapping,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Mapping => f.write_str("mapping"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("missing {0} workbook")]
    MissingInput(InputKind),

    #[error("source workbook has no sheets")]
    EmptyWorkbook,

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
