//! Driver registry for resolving connection URLs to drivers

use std::collections::HashMap;
use std::sync::Arc;
use tckit_core::{DatabaseDriver, Result, TckitError, redact_url, url_scheme};

use crate::DatabaseUrl;

/// Registry of available database drivers, keyed by URL scheme
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn DatabaseDriver>>,
}

impl DriverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Create a registry with all built-in drivers registered
    pub fn with_defaults() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();

        #[cfg(feature = "sqlite")]
        registry.register(Arc::new(crate::sqlite::SqliteDriver::new()));
        #[cfg(feature = "postgres")]
        registry.register(Arc::new(crate::postgres::PostgresDriver::new()));

        registry
    }

    /// Register a driver under each of its URL schemes
    pub fn register(&mut self, driver: Arc<dyn DatabaseDriver>) {
        tracing::debug!(driver = %driver.name(), "registering database driver");
        for scheme in driver.url_schemes() {
            self.drivers.insert(scheme.to_ascii_lowercase(), Arc::clone(&driver));
        }
    }

    /// Get the driver for a URL scheme
    pub fn get(&self, scheme: &str) -> Option<Arc<dyn DatabaseDriver>> {
        let driver = self.drivers.get(&scheme.to_ascii_lowercase()).cloned();
        if driver.is_none() {
            tracing::warn!(scheme = %scheme, "no driver registered for URL scheme");
        }
        driver
    }

    /// List all registered URL schemes, sorted
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }

    /// Resolve `url` to a connection provider backed by the matching driver
    pub fn provider_for(&self, url: &str) -> Result<DatabaseUrl> {
        let scheme = url_scheme(url).ok_or_else(|| {
            TckitError::Configuration(format!("Connection URL has no scheme: '{}'", redact_url(url)))
        })?;
        let driver = self.get(scheme).ok_or_else(|| {
            TckitError::NotSupported(format!("No driver for URL scheme '{}'", scheme))
        })?;
        Ok(DatabaseUrl::new(url, driver))
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
