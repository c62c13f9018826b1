//! Tracing subscriber setup for test binaries
//!
//! Container output routed through [`crate::TracingSink`] only shows up if a
//! subscriber is installed. Test suites call [`init_for_tests`]; harness
//! binaries that want file output use [`init`] with a [`LoggingConfig`].
//! `RUST_LOG` always takes precedence over the configured filter.

use std::path::PathBuf;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{LogSettings, LogsError};

const DEFAULT_FILTER: &str = "info,tckit=debug";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory for JSON log files; `None` disables file output
    pub log_dir: Option<PathBuf>,

    /// Whether to write human-readable output to the console
    pub enable_console_logs: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Default filter directives, used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            enable_console_logs: true,
            include_location: cfg!(debug_assertions),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Console plus JSON files under the platform's local data directory
    pub fn with_file_logs() -> Self {
        Self {
            log_dir: Some(log_directory()),
            ..Self::default()
        }
    }

    /// Configuration derived from container log settings
    pub fn from_settings(settings: &LogSettings) -> Self {
        Self {
            default_filter: settings
                .filter
                .clone()
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            ..Self::default()
        }
    }
}

/// Default directory for JSON log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tckit")
        .join("logs")
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber.
///
/// Returns the file writer guard when file output is enabled; keep it alive
/// for as long as logs should be flushed. Fails if a global subscriber is
/// already installed.
pub fn init(config: LoggingConfig) -> Result<Option<WorkerGuard>, LogsError> {
    let mut layers = Vec::new();
    let mut guard = None;

    if config.enable_console_logs {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_filter(env_filter(&config.default_filter))
            .boxed();
        layers.push(console_layer);
    }

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;
        let file_appender = tracing_appender::rolling::daily(log_dir, "tckit.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_ansi(false)
            .json()
            .with_writer(non_blocking)
            .with_filter(env_filter(&config.default_filter))
            .boxed();
        layers.push(json_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| LogsError::Init(e.to_string()))?;

    tracing::debug!(
        log_dir = ?config.log_dir,
        console_enabled = config.enable_console_logs,
        "logging initialized"
    );
    Ok(guard)
}

/// Install a test-writer subscriber once per process.
///
/// Output is captured by the test harness and only printed for failing
/// tests. Safe to call from every test.
pub fn init_for_tests() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let subscriber = fmt()
            .with_env_filter(env_filter(DEFAULT_FILTER))
            .with_test_writer()
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
