//! Error types for PaperScope
//!
//! Provides:
//! - Distinct error types for different failure modes
//! - Row-level load warnings that never abort a load
//!
//! No error in this crate family is fatal to the hosting process: a failed
//! load degrades to "no data", an empty filter result is a value, and
//! malformed rows are reported as [`LoadWarning`]s next to the parsed corpus.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Corpus source file is absent
    #[error("Corpus not found: {path}")]
    CorpusNotFound { path: String },

    /// Corpus source is structurally unreadable (bad header, broken rows)
    #[error("Failed to parse corpus {path}: {message}")]
    CorpusParse { path: String, message: String },

    /// Blank or whitespace-only keyword submitted to the keyword filter
    #[error("Keyword query is empty")]
    EmptyQuery,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

impl AppError {
    /// Whether this error means "render nothing" rather than a caller bug
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            AppError::CorpusNotFound { .. } | AppError::CorpusParse { .. }
        )
    }
}

/// Row-level defect observed while loading a corpus
///
/// Warnings are collected per load and surfaced alongside the parsed records;
/// they never abort the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// Row has no title after trimming; skipped because it has no identity
    MissingTitle { row: usize },

    /// Year cell could not be parsed as an integer; faceting ignores the row
    UnparseableYear { row: usize, value: String },

    /// Title already seen earlier in the file; the later row wins downstream
    DuplicateTitle { row: usize, title: String },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::MissingTitle { row } => {
                write!(f, "row {row}: missing title, row skipped")
            }
            LoadWarning::UnparseableYear { row, value } => {
                write!(f, "row {row}: unparseable year {value:?}")
            }
            LoadWarning::DuplicateTitle { row, title } => {
                write!(f, "row {row}: duplicate title {title:?}, later row wins")
            }
        }
    }
}
