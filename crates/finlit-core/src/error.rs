use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("`{value}` is not a valid number for {field}")]
    Parse { field: &'static str, value: String },
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Persistence(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("External service error: {0}")]
    ExternalService(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}

impl CoreError {
    pub fn parse(field: &'static str, value: impl Into<String>) -> Self {
        CoreError::Parse {
            field,
            value: value.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::Parse { .. })
    }
}
