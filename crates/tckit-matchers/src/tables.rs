//! Table listing and dropping on a single connection

use tckit_core::{Connection, ConnectionProvider, normalize_table_name, redact_url, strip_quotes};

use crate::MatcherError;

/// Catalog, schema and table patterns identifying a set of tables
///
/// Each segment is a SQL `LIKE` pattern. A missing catalog or schema
/// matches any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePattern {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table: String,
}

impl TablePattern {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            table: table.into(),
        }
    }

    pub fn from_parts(catalog: Option<&str>, schema: Option<&str>, table: &str) -> Self {
        Self {
            catalog: catalog.map(str::to_string),
            schema: schema.map(str::to_string),
            table: table.to_string(),
        }
    }

    pub fn in_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Dot-joined form used in descriptions
    pub fn qualified_name(&self) -> String {
        normalize_table_name(self.catalog.as_deref(), self.schema.as_deref(), &self.table)
    }
}

impl From<&str> for TablePattern {
    fn from(table: &str) -> Self {
        Self::new(table)
    }
}

/// List the fully-qualified names of the tables matching the given patterns.
///
/// Surrounding quotes are stripped from every segment first, so
/// `"\"users\""` and `"users"` list the same tables. Names come back in the
/// order the metadata reports them.
pub async fn list_tables(
    conn: &dyn Connection,
    url: &str,
    catalog: Option<&str>,
    schema: Option<&str>,
    table_pattern: &str,
) -> Result<Vec<String>, MatcherError> {
    let catalog = catalog.map(strip_quotes);
    let schema = schema.map(strip_quotes);
    let table_pattern = strip_quotes(table_pattern);

    let metadata = conn
        .as_table_metadata()
        .ok_or_else(|| MatcherError::Unsupported {
            driver: conn.driver_name().to_string(),
        })?;

    let tables = metadata
        .list_tables_matching(catalog, schema, table_pattern)
        .await
        .map_err(|e| MatcherError::Listing {
            pattern: normalize_table_name(catalog, schema, table_pattern),
            url: redact_url(url),
            message: e.to_string(),
        })?;

    let names: Vec<String> = tables.iter().map(|table| table.qualified_name()).collect();
    tracing::debug!(
        pattern = %normalize_table_name(catalog, schema, table_pattern),
        count = names.len(),
        "listed matching tables"
    );
    Ok(names)
}

/// Drop each table in order with `DROP TABLE IF EXISTS`.
///
/// Stops at the first failure; tables after it are left in place.
pub async fn drop_tables(conn: &dyn Connection, url: &str, tables: &[String]) -> Result<(), MatcherError> {
    for table in tables {
        let sql = format!("DROP TABLE IF EXISTS {}", table);
        conn.execute(&sql).await.map_err(|e| MatcherError::Drop {
            table: table.clone(),
            url: redact_url(url),
            message: e.to_string(),
        })?;
        tracing::debug!(table = %table, "dropped table");
    }
    Ok(())
}

/// Open a connection with no extra properties
pub(crate) async fn open_connection(provider: &dyn ConnectionProvider) -> Result<Box<dyn Connection>, MatcherError> {
    provider
        .create_connection("")
        .await
        .map_err(|e| MatcherError::Connection {
            url: redact_url(&provider.connection_url()),
            message: e.to_string(),
        })
}

/// Close a connection, logging rather than returning a failure
pub(crate) async fn close_connection(conn: &dyn Connection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(driver = conn.driver_name(), error = %e, "failed to close connection");
    }
}
