//! Destinations for routed container output

use crate::Severity;

/// Target that [`TracingSink`] emits container output on
///
/// Filter on it to tune container output separately from the rest of the
/// test's logging, e.g. `RUST_LOG=info,tckit::container=debug`.
pub const CONTAINER_LOG_TARGET: &str = "tckit::container";

/// Receives lines the router decided to forward
pub trait LogSink: Send + Sync {
    fn emit(&self, severity: Severity, container: &str, line: &str);
}

/// Forwards container output as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, severity: Severity, container: &str, line: &str) {
        match severity {
            Severity::Debug => {
                tracing::debug!(target: "tckit::container", container = %container, "{}", line)
            }
            Severity::Info => {
                tracing::info!(target: "tckit::container", container = %container, "{}", line)
            }
            Severity::Warn => {
                tracing::warn!(target: "tckit::container", container = %container, "{}", line)
            }
        }
    }
}
