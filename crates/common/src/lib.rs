//! PaperScope Common Library
//!
//! Shared code for the PaperScope crates including:
//! - Paper record and citation table models
//! - Error types and handling
//! - Configuration management
//! - Telemetry initialization

pub mod config;
pub mod errors;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, LoadWarning, Result};
pub use models::{CitationLink, CitationPaper, PaperRecord};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default separator for multi-value CSV fields (authors, keywords, cited papers)
pub const DEFAULT_FIELD_DELIMITER: char = ';';
