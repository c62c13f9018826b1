//! Error types for log routing configuration

use thiserror::Error;

/// An unknown verbosity name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid verbosity '{0}': expected one of all, partial, none")]
pub struct ParseVerbosityError(pub String);

/// Errors raised while loading settings or installing the subscriber
#[derive(Error, Debug)]
pub enum LogsError {
    #[error(transparent)]
    InvalidVerbosity(#[from] ParseVerbosityError),

    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging initialization failed: {0}")]
    Init(String),
}
