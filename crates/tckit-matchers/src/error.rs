//! Error types for table preconditions

use thiserror::Error;

/// Failures raised while evaluating a precondition.
///
/// URLs carried here are already redacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// Opening the connection failed
    #[error("Unable to connect to database '{url}': {message}")]
    Connection { url: String, message: String },

    /// The metadata query failed
    #[error("Unable to extract tables matching '{pattern}' at '{url}': {message}")]
    Listing {
        pattern: String,
        url: String,
        message: String,
    },

    /// A `DROP TABLE` statement failed; the remaining drops were skipped
    #[error("Unable to drop table '{table}' at '{url}': {message}")]
    Drop {
        table: String,
        url: String,
        message: String,
    },

    /// The connection has no metadata interface
    #[error("Driver '{driver}' does not support table metadata")]
    Unsupported { driver: String },

    /// The precondition evaluated but did not hold
    #[error("{0}")]
    AssertionFailed(String),
}
