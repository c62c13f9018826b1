//! PostgreSQL driver implementation

use async_trait::async_trait;
use tckit_core::{Connection, DatabaseDriver, Result};

use crate::PostgresConnection;

/// PostgreSQL database driver
pub struct PostgresDriver;

impl PostgresDriver {
    /// Create a new PostgreSQL driver instance
    pub fn new() -> Self {
        tracing::debug!("PostgreSQL driver initialized");
        Self
    }
}

impl Default for PostgresDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for PostgresDriver {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn url_schemes(&self) -> &'static [&'static str] {
        &["postgres", "postgresql"]
    }

    #[tracing::instrument(skip(self, url))]
    async fn connect(&self, url: &str) -> Result<Box<dyn Connection>> {
        let conn = PostgresConnection::connect(url).await.map_err(|e| {
            tracing::error!(error = %e, "failed to connect to PostgreSQL database");
            e
        })?;
        Ok(Box::new(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tckit_core::TckitError;

    #[test]
    fn test_driver_identity() {
        let driver = PostgresDriver::new();
        assert_eq!(driver.name(), "postgresql");
        assert_eq!(driver.url_schemes(), &["postgres", "postgresql"]);
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = PostgresDriver::new().connect("postgres://host:notaport/db").await;
        assert!(matches!(result, Err(TckitError::Connection(_))));
    }
}
