//! Error types for daymark.

use thiserror::Error;

/// Errors that can occur in daymark operations.
///
/// The date engine itself never returns these to callers of its infallible
/// functions; they surface from the store, config and interchange layers, and
/// from the `try_` variants of engine conversions.
#[derive(Error, Debug)]
pub enum DaymarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Event not found: {0}")]
    EventNotFound(u64),

    #[error("Category not found: {0}")]
    CategoryNotFound(u64),

    #[error("Notebook not found: {0}")]
    NotebookNotFound(u64),

    #[error("Default category '{0}' cannot be deleted")]
    DefaultCategory(String),

    #[error("Unsupported backup version: {0}")]
    UnsupportedBackupVersion(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("ICS generation error: {0}")]
    Ics(String),
}

impl From<serde_json::Error> for DaymarkError {
    fn from(e: serde_json::Error) -> Self {
        DaymarkError::Serialization(e.to_string())
    }
}

/// Result type alias for daymark operations.
pub type DaymarkResult<T> = Result<T, DaymarkError>;
