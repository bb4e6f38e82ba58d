//! Error types for issuelens-core

use thiserror::Error;

/// Main error type for the issuelens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error for tracker exports
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// An aggregation was asked to run over an empty population
    #[error("empty input: {0}")]
    EmptyInput(String),
}

/// Result type alias for issuelens-core
pub type Result<T> = std::result::Result<T, Error>;
