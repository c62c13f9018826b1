//! Error types for tckit

use thiserror::Error;

/// Core error type for tckit database operations
#[derive(Error, Debug)]
pub enum TckitError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

/// Result type alias for tckit operations
pub type Result<T> = std::result::Result<T, TckitError>;
