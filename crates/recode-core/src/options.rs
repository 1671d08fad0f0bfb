//! Run options, loadable from TOML.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [dates]
//! name_tokens = ["ngày", "date", "birth", "sinh", "dob"]
//! sample_size = 5
//! epoch = "excel1900"
//!
//! [derived]
//! dob_field = "date_of_birth"
//!
//! [mapping]
//! duplicates = "reject"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use recode_map::DuplicatePolicy;
use recode_transform::{DateOptions, DerivedFieldOptions};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingOptions {
    pub duplicates: DuplicatePolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub dates: DateOptions,
    pub derived: DerivedFieldOptions,
    pub mapping: MappingOptions,
}

impl PipelineOptions {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }
}
