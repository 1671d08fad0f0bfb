//! Run orchestration for the recode pipeline.
//!
//! [`Pipeline::run`] ties the library crates together: date normalization
//! from `recode-transform`, dictionary building from `recode-map`, then
//! row transformation.

pub mod error;
pub mod options;
pub mod pipeline;

pub use error::{ConfigError, InputKind, PipelineError};
pub use options::{MappingOptions, PipelineOptions};
pub use pipeline::{Pipeline, PipelineOutput, RunReport};
