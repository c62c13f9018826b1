//! tckit Logs - Container output routing
//!
//! Test containers write a lot to stdout and stderr while they start,
//! much of it the contained database's own logging. This crate forwards
//! that output to `tracing` selectively:
//!
//! - `Verbosity` - how much to forward (`All`, `Partial`, `None`)
//! - `SelectiveLogConsumer` - the router, usable as a `testcontainers`
//!   log consumer
//! - `LogSink` / `TracingSink` - where routed lines end up
//! - `LogSettings` - TOML and environment configuration
//! - `logging` - `tracing-subscriber` setup for test binaries

mod consumer;
mod error;
pub mod logging;
mod settings;
mod sink;
mod verbosity;

pub use consumer::SelectiveLogConsumer;
pub use error::{LogsError, ParseVerbosityError};
pub use settings::{LogSettings, VERBOSITY_ENV_VAR};
pub use sink::{CONTAINER_LOG_TARGET, LogSink, TracingSink};
pub use verbosity::{OutputStream, Severity, Verbosity, is_embedded_log_line};
