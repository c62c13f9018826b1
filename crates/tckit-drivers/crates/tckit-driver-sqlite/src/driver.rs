//! SQLite driver implementation

use async_trait::async_trait;
use tckit_core::{Connection, DatabaseDriver, Result, TckitError};

use crate::SqliteConnection;

/// SQLite database driver
///
/// Accepts `sqlite:` URLs: `sqlite:///abs/path.db`, `sqlite://relative.db`,
/// `sqlite::memory:`. A query string is passed on to SQLite as `file:` URI
/// parameters (e.g. `?mode=ro`).
pub struct SqliteDriver;

impl SqliteDriver {
    /// Create a new SQLite driver instance
    pub fn new() -> Self {
        tracing::debug!("SQLite driver initialized");
        Self
    }

    /// Turn a `sqlite:` URL into something `SqliteConnection::open` accepts
    pub fn database_path(url: &str) -> Result<String> {
        let rest = url
            .strip_prefix("sqlite:")
            .ok_or_else(|| TckitError::Configuration(format!("Not a sqlite URL: '{}'", url)))?;
        let rest = rest.strip_prefix("//").unwrap_or(rest);

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        if path.is_empty() {
            return Err(TckitError::Configuration(format!(
                "SQLite URL has no database path: '{}'",
                url
            )));
        }

        Ok(match query {
            Some(query) if !query.is_empty() => format!("file:{}?{}", path, query),
            _ => path.to_string(),
        })
    }
}

impl Default for SqliteDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for SqliteDriver {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn url_schemes(&self) -> &'static [&'static str] {
        &["sqlite"]
    }

    #[tracing::instrument(skip(self))]
    async fn connect(&self, url: &str) -> Result<Box<dyn Connection>> {
        let path = Self::database_path(url)?;
        let conn = SqliteConnection::open(&path).map_err(|e| {
            tracing::error!(error = %e, "failed to connect to SQLite database");
            e
        })?;
        Ok(Box::new(conn))
    }
}
