//! Error types for the report pipeline.
//!
//! The formatting helpers never fail; only loading, writing and the math
//! engine itself produce these.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DisplayError>;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The typesetting engine failed outright (not a malformed expression).
    #[error("Math rendering error: {0}")]
    Math(String),

    #[error("Invalid math options: {0}")]
    MathOptions(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),
}

impl DisplayError {
    pub fn file_open(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }
}

impl From<katex::Error> for DisplayError {
    fn from(err: katex::Error) -> Self {
        Self::Math(err.to_string())
    }
}
