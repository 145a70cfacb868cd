//! Error types for the habit_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for habit_core operations
///
/// Store mutations never return these; they only surface at the edges
/// (configuration, storage backends, export, argument parsing).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A date or timestamp argument could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// An enumerated value (category, frequency, coach style) was not recognised
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// No built-in template with the given id
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Key-value storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
