use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("duplicate sheet name: {0}")]
    DuplicateSheet(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
