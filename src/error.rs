//! Error types for the FX tracker

use thiserror::Error;

/// Main error type for the FX tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for FX tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
