//! Container log settings
//!
//! Settings come from a small TOML document:
//!
//! ```toml
//! verbosity = "partial"
//! filter = "info,tckit::container=debug"
//! ```
//!
//! and the `TCKIT_CONTAINER_LOGS` environment variable overrides the
//! verbosity, so a CI job can turn container output on without touching
//! the test sources.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{LogsError, SelectiveLogConsumer, Verbosity};

/// Environment variable that overrides [`LogSettings::verbosity`]
pub const VERBOSITY_ENV_VAR: &str = "TCKIT_CONTAINER_LOGS";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Verbosity new consumers start with
    pub verbosity: Verbosity,
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: Option<String>,
}

impl LogSettings {
    pub fn from_toml_str(source: &str) -> Result<Self, LogsError> {
        Ok(toml::from_str(source)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LogsError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), verbosity = %settings.verbosity, "loaded log settings");
        Ok(settings)
    }

    /// Apply `TCKIT_CONTAINER_LOGS`, if set
    pub fn with_env_overrides(self) -> Result<Self, LogsError> {
        let value = std::env::var(VERBOSITY_ENV_VAR).ok();
        self.with_verbosity_override(value.as_deref())
    }

    /// Apply an override value as read from the environment
    ///
    /// Blank values are ignored; unknown names are an error rather than
    /// being silently dropped.
    pub fn with_verbosity_override(mut self, value: Option<&str>) -> Result<Self, LogsError> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.verbosity = value.parse()?;
        }
        Ok(self)
    }

    /// Build a consumer for the named container with these settings
    pub fn consumer(&self, name: impl AsRef<str>) -> SelectiveLogConsumer {
        SelectiveLogConsumer::with_verbosity(name, self.verbosity)
    }
}
