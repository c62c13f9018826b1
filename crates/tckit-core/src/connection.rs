//! Connection and connection-provider traits

use crate::{Result, TableRef};
use async_trait::async_trait;

/// A live database connection
///
/// Only the operations the preconditions need are exposed: statement
/// execution, metadata access and lifecycle.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgresql")
    fn driver_name(&self) -> &str;

    /// Execute a statement that returns no rows (DDL, DML)
    ///
    /// Returns the number of affected rows as reported by the driver.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Get the table metadata interface if supported
    fn as_table_metadata(&self) -> Option<&dyn TableMetadata> {
        None
    }

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}

/// Table listing through metadata introspection
#[async_trait]
pub trait TableMetadata: Send + Sync {
    /// List the tables whose catalog, schema and name match the given patterns.
    ///
    /// Patterns use SQL `LIKE` syntax (`%` for any run of characters, `_`
    /// for exactly one, `\` to escape). `None` for catalog or schema means
    /// "any". Results come back in the order the database reports them.
    async fn list_tables_matching(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table_pattern: &str,
    ) -> Result<Vec<TableRef>>;
}

/// Something that hands out fresh database connections.
///
/// Typically a running database container. The provider owns the container
/// lifecycle; callers only ask it for its URL and for connections.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// URL identifying the database, used in diagnostics.
    ///
    /// The URL may embed credentials; use [`crate::redact_url`] before
    /// printing it.
    fn connection_url(&self) -> String;

    /// Open a new connection.
    ///
    /// `query` carries extra connection properties in URL query form
    /// (`key=value&key2=value2`); an empty string means none.
    async fn create_connection(&self, query: &str) -> Result<Box<dyn Connection>>;
}
