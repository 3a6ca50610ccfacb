//! Centralized error types for kgsnap.

use thiserror::Error;

/// Main error type for kgsnap operations.
#[derive(Error, Debug)]
pub enum KgError {
    #[error("Invalid technology class: '{0}' (expected Software, Experiment, or TargetClass)")]
    InvalidTechClass(String),

    #[error("Row has {got} cells but table '{table}' has {expected} columns")]
    ColumnArity {
        table: String,
        expected: usize,
        got: usize,
    },

    #[error("Dataset '{dataset}' returned a null value in count column '{column}'")]
    NullCount { dataset: String, column: String },

    #[error("Dataset '{dataset}' has no column named '{column}'")]
    MissingColumn { dataset: String, column: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for kgsnap operations.
pub type KgResult<T> = Result<T, KgError>;

impl KgError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
