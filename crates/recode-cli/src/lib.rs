//! CLI library components for the recode tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
