//! SQLite connection implementation

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use tckit_core::{
    Connection, PatternCase, Result, TableMetadata, TableRef, TckitError, like_match,
};

/// Database that SQLite opens every connection with
const MAIN_DATABASE: &str = "main";

/// Database holding `CREATE TEMP TABLE` tables
const TEMP_DATABASE: &str = "temp";

/// SQLite connection wrapper
pub struct SqliteConnection {
    conn: Mutex<Option<RusqliteConnection>>,
    path: String,
}

impl SqliteConnection {
    /// Open a SQLite database
    ///
    /// `path` is a file path, `:memory:` or a `file:` URI. Every `:memory:`
    /// connection gets its own private database.
    pub fn open(path: &str) -> Result<Self> {
        tracing::info!(path = %path, "opening SQLite database");

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = if path == ":memory:" {
            RusqliteConnection::open_in_memory().map_err(|e| {
                TckitError::Connection(format!("Failed to open in-memory database: {}", e))
            })?
        } else {
            if !path.starts_with("file:") {
                let file_path = std::path::Path::new(path);
                if let Some(parent) = file_path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        return Err(TckitError::Connection(format!(
                            "Parent directory does not exist: {}",
                            parent.display()
                        )));
                    }
                }
            }

            RusqliteConnection::open_with_flags(path, flags).map_err(|e| {
                TckitError::Connection(format!(
                    "Failed to open SQLite database at '{}': {}",
                    path, e
                ))
            })?
        };

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| TckitError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        tracing::debug!(path = %path, "SQLite database connection established");
        Ok(Self {
            conn: Mutex::new(Some(conn)),
            path: path.to_string(),
        })
    }

    /// Execute several statements at once (fixtures, schema scripts)
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        tracing::debug!("executing SQL batch");
        self.with_conn(|conn| {
            conn.execute_batch(sql)
                .map_err(|e| TckitError::Query(format!("Failed to execute batch: {}", e)))
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&RusqliteConnection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock();
        let conn = guard
            .as_ref()
            .ok_or_else(|| TckitError::Connection("SQLite connection is closed".into()))?;
        f(conn)
    }
}

/// Quote an identifier for interpolation into SQL
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Names of the attached databases, in `PRAGMA database_list` order
fn database_names(conn: &RusqliteConnection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("PRAGMA database_list")
        .map_err(|e| TckitError::Metadata(format!("Failed to list databases: {}", e)))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| TckitError::Metadata(format!("Failed to list databases: {}", e)))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| TckitError::Metadata(format!("Failed to read database list: {}", e)))?;
    Ok(names)
}

/// Table names of one database, excluding SQLite's internal tables
fn table_names(conn: &RusqliteConnection, database: &str) -> Result<Vec<String>> {
    let master = if database == TEMP_DATABASE {
        "sqlite_temp_master"
    } else {
        "sqlite_master"
    };
    let sql = format!(
        "SELECT name FROM {}.{} WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' ORDER BY name",
        quote_ident(database),
        master
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| TckitError::Metadata(format!("Failed to list tables in '{}': {}", database, e)))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| TckitError::Metadata(format!("Failed to list tables in '{}': {}", database, e)))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| TckitError::Metadata(format!("Failed to read table names: {}", e)))?;
    Ok(names)
}

#[async_trait]
impl Connection for SqliteConnection {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str) -> Result<u64> {
        let rows_affected = self.with_conn(|conn| {
            conn.execute(sql, [])
                .map_err(|e| TckitError::Query(format!("Failed to execute statement: {}", e)))
        })?;

        tracing::debug!(affected_rows = rows_affected, "statement executed");
        Ok(rows_affected as u64)
    }

    fn as_table_metadata(&self) -> Option<&dyn TableMetadata> {
        Some(self)
    }

    async fn close(&self) -> Result<()> {
        let conn = self.conn.lock().take();
        if let Some(conn) = conn {
            tracing::debug!(path = %self.path, "closing SQLite connection");
            conn.close().map_err(|(_, e)| {
                TckitError::Connection(format!("Failed to close SQLite connection: {}", e))
            })?;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.conn.lock().is_none()
    }
}

#[async_trait]
impl TableMetadata for SqliteConnection {
    /// SQLite has no catalogs; `catalog` is ignored. The schema pattern is
    /// matched against attached database names, and tables in `main` are
    /// reported without a schema.
    #[tracing::instrument(skip(self))]
    async fn list_tables_matching(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table_pattern: &str,
    ) -> Result<Vec<TableRef>> {
        if catalog.is_some_and(|c| !c.is_empty()) {
            tracing::debug!("SQLite has no catalogs, ignoring catalog pattern");
        }

        let tables = self.with_conn(|conn| {
            let mut tables = Vec::new();
            for database in database_names(conn)? {
                if let Some(schema) = schema {
                    if !like_match(schema, &database, PatternCase::AsciiInsensitive) {
                        continue;
                    }
                }

                for name in table_names(conn, &database)? {
                    if !like_match(table_pattern, &name, PatternCase::AsciiInsensitive) {
                        continue;
                    }
                    let table = TableRef::new(name);
                    tables.push(if database == MAIN_DATABASE {
                        table
                    } else {
                        table.with_schema(database.as_str())
                    });
                }
            }
            Ok(tables)
        })?;

        tracing::debug!(table_count = tables.len(), "tables listed");
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with_tables(tables: &[&str]) -> SqliteConnection {
        let conn = SqliteConnection::open(":memory:").expect("Failed to open in-memory db");
        for table in tables {
            conn.execute_batch(&format!("CREATE TABLE {} (id INTEGER PRIMARY KEY)", table))
                .expect("Failed to create table");
        }
        conn
    }

    #[tokio::test]
    async fn test_list_tables_by_pattern() {
        let conn = open_with_tables(&["users", "users_archive", "orders"]);

        let tables = conn.list_tables_matching(None, None, "users%").await.unwrap();
        let names: Vec<String> = tables.iter().map(TableRef::qualified_name).collect();
        assert_eq!(names, vec!["users", "users_archive"]);

        let tables = conn.list_tables_matching(None, None, "orders").await.unwrap();
        assert_eq!(tables, vec![TableRef::new("orders")]);
    }

    #[tokio::test]
    async fn test_list_tables_is_case_insensitive() {
        let conn = open_with_tables(&["Users"]);
        let tables = conn.list_tables_matching(None, None, "users").await.unwrap();
        assert_eq!(tables, vec![TableRef::new("Users")]);
    }

    #[tokio::test]
    async fn test_list_tables_skips_internal_tables() {
        let conn = open_with_tables(&[]);
        conn.execute_batch("CREATE TABLE seq (id INTEGER PRIMARY KEY AUTOINCREMENT)")
            .unwrap();

        let tables = conn.list_tables_matching(None, None, "%").await.unwrap();
        assert_eq!(tables, vec![TableRef::new("seq")]);
    }

    #[tokio::test]
    async fn test_list_tables_reports_non_main_schema() {
        let conn = open_with_tables(&["users"]);
        conn.execute_batch("CREATE TEMP TABLE scratch (id INTEGER)").unwrap();

        let tables = conn.list_tables_matching(None, None, "%").await.unwrap();
        let names: Vec<String> = tables.iter().map(TableRef::qualified_name).collect();
        assert_eq!(names, vec!["users", "temp.scratch"]);

        let tables = conn
            .list_tables_matching(None, Some("temp"), "%")
            .await
            .unwrap();
        assert_eq!(tables, vec![TableRef::new("scratch").with_schema("temp")]);
    }

    #[tokio::test]
    async fn test_execute_and_close() {
        let conn = open_with_tables(&["users"]);
        conn.execute("DROP TABLE IF EXISTS users").await.unwrap();
        assert!(conn.list_tables_matching(None, None, "users").await.unwrap().is_empty());

        assert!(!conn.is_closed());
        conn.close().await.unwrap();
        assert!(conn.is_closed());
        // closing twice is a no-op
        conn.close().await.unwrap();

        let err = conn.execute("SELECT 1").await.unwrap_err();
        assert!(matches!(err, TckitError::Connection(_)));
    }

    #[test]
    fn test_open_rejects_missing_parent_directory() {
        let result = SqliteConnection::open("/definitely/not/here/test.db");
        assert!(matches!(result, Err(TckitError::Connection(_))));
    }
}
