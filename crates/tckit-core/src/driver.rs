//! Database driver trait definition

use crate::{Connection, Result, redact_url};
use async_trait::async_trait;

/// A database driver opens connections from a URL
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgresql")
    fn name(&self) -> &'static str;

    /// URL schemes handled by this driver (without the trailing `:`)
    fn url_schemes(&self) -> &'static [&'static str];

    /// Open a connection to the database at `url`
    async fn connect(&self, url: &str) -> Result<Box<dyn Connection>>;

    /// Test that a connection can be opened and closed again
    async fn test_connection(&self, url: &str) -> Result<()> {
        tracing::debug!(driver = self.name(), url = %redact_url(url), "testing connection");
        let conn = self.connect(url).await?;
        conn.close().await
    }
}
