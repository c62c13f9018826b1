//! Test fixtures shared by the integration tests.
//!
//! Tests name the database they want with [`TestDriver`] and receive a
//! [`TestDatabase`], a `ConnectionProvider` the table preconditions can be
//! built from. SQLite databases live in a fresh temporary directory per
//! fixture; PostgreSQL shares one lazily started container, so tests use
//! [`unique_table_name`] to stay out of each other's way.
//!
//! ```rust,ignore
//! use tckit_tests::fixtures::{TestDriver, test_database};
//! use tckit_matchers::TablePreconditions;
//!
//! let db = test_database(TestDriver::Sqlite).await?;
//! db.execute("CREATE TABLE users (id INTEGER)").await?;
//! assert!(db.table_exists(None, None, "users").evaluate().await?.matched);
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tckit_core::{Connection, ConnectionProvider};
use tckit_drivers::{DatabaseUrl, DriverRegistry};
use tckit_logs::{LogSink, Severity};
use tempfile::TempDir;

use crate::test_containers::postgres_container;

/// Database flavour for parameterized testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestDriver {
    /// File-backed SQLite database in a temporary directory
    Sqlite,
    /// PostgreSQL in a shared Docker container
    Postgres,
}

impl TestDriver {
    /// Schema that unqualified `CREATE TABLE` statements land in
    pub fn default_schema(&self) -> Option<&'static str> {
        match self {
            TestDriver::Sqlite => None,
            TestDriver::Postgres => Some("public"),
        }
    }

    /// Fully-qualified name the metadata listing reports for `table`
    pub fn qualified(&self, table: &str) -> String {
        match self {
            TestDriver::Sqlite => table.to_string(),
            TestDriver::Postgres => format!("postgres.public.{}", table),
        }
    }
}

/// A database the preconditions can be evaluated against
pub struct TestDatabase {
    driver: TestDriver,
    provider: DatabaseUrl,
    _dir: Option<TempDir>,
}

impl TestDatabase {
    /// Which database this is
    pub fn driver(&self) -> TestDriver {
        self.driver
    }

    /// Run `sql` on a short-lived connection
    pub async fn execute(&self, sql: &str) -> Result<u64> {
        let conn = self
            .provider
            .create_connection("")
            .await
            .with_context(|| format!("failed to connect to {:?}", self.provider))?;
        let result = conn.execute(sql).await;
        conn.close().await.context("failed to close connection")?;
        result.with_context(|| format!("failed to execute: {}", sql))
    }

    /// Create one single-column table per name
    pub async fn create_tables(&self, names: &[impl AsRef<str>]) -> Result<()> {
        for name in names {
            self.execute(&format!("CREATE TABLE {} (id INTEGER)", name.as_ref()))
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectionProvider for TestDatabase {
    fn connection_url(&self) -> String {
        self.provider.connection_url()
    }

    async fn create_connection(&self, query: &str) -> tckit_core::Result<Box<dyn Connection>> {
        self.provider.create_connection(query).await
    }
}

/// Fresh SQLite database in its own temporary directory
pub fn sqlite_database() -> Result<TestDatabase> {
    let dir = tempfile::tempdir().context("failed to create temp dir")?;
    let url = format!("sqlite://{}", dir.path().join("tckit.db").display());
    let provider = DriverRegistry::with_defaults()
        .provider_for(&url)
        .context("failed to resolve sqlite driver")?;

    Ok(TestDatabase {
        driver: TestDriver::Sqlite,
        provider,
        _dir: Some(dir),
    })
}

/// Provider for `driver`, starting the container on first use
pub async fn test_database(driver: TestDriver) -> Result<TestDatabase> {
    tckit_logs::logging::init_for_tests();

    match driver {
        TestDriver::Sqlite => sqlite_database(),
        TestDriver::Postgres => {
            let info = postgres_container().await?;
            let provider = DriverRegistry::with_defaults()
                .provider_for(&info.url())
                .context("failed to resolve postgres driver")?;
            Ok(TestDatabase {
                driver,
                provider,
                _dir: None,
            })
        }
    }
}

/// Table name unique within this test process
pub fn unique_table_name(prefix: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!(
        "{}_{}_{}",
        prefix,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Log sink that keeps every line it receives
///
/// Clones share the recorded lines, so one handle can go to the consumer
/// and another stay with the test.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl RecordingSink {
    /// Lines received so far, with their severity
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().clone()
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, severity: Severity, _container: &str, line: &str) {
        self.lines.lock().push((severity, line.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_table_names_differ() {
        assert_ne!(unique_table_name("t"), unique_table_name("t"));
    }

    #[test]
    fn test_recording_sink_clones_share_lines() {
        let sink = RecordingSink::default();
        let handle = sink.clone();
        sink.emit(Severity::Warn, "postgres", "first");
        sink.emit(Severity::Debug, "postgres", "second");
        assert_eq!(
            handle.lines(),
            vec![
                (Severity::Warn, "first".to_string()),
                (Severity::Debug, "second".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_sqlite_fixture_executes() -> Result<()> {
        let db = sqlite_database()?;
        db.create_tables(&["fixture_check"]).await?;
        assert_eq!(db.driver(), TestDriver::Sqlite);
        assert!(db.connection_url().starts_with("sqlite://"));
        Ok(())
    }
}
