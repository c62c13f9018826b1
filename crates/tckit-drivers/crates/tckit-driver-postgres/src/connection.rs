//! PostgreSQL connection implementation

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tckit_core::{Connection, Result, TableMetadata, TableRef, TckitError};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, types::ToSql};

/// Tables and temporary tables; views cannot be dropped with `DROP TABLE`
const LIST_TABLES_SQL: &str = "SELECT table_catalog::text, table_schema::text, table_name::text
     FROM information_schema.tables
     WHERE table_type IN ('BASE TABLE', 'LOCAL TEMPORARY')
       AND ($1::text IS NULL OR table_catalog::text LIKE $1)
       AND ($2::text IS NULL OR table_schema::text LIKE $2)
       AND table_name::text LIKE $3
     ORDER BY table_catalog, table_schema, table_name";

pub(crate) fn format_postgres_error(error: &tokio_postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut message = db_error.message().to_string();
    if let Some(detail) = db_error.detail() {
        if !detail.trim().is_empty() {
            message.push_str(&format!(" (detail: {})", detail));
        }
    }
    if let Some(hint) = db_error.hint() {
        if !hint.trim().is_empty() {
            message.push_str(&format!(" (hint: {})", hint));
        }
    }

    format!("{} (code: {})", message, db_error.code().code())
}

/// PostgreSQL connection wrapper
///
/// The `tokio-postgres` connection future runs on a task spawned onto the
/// caller's Tokio runtime; it finishes once the connection is closed.
pub struct PostgresConnection {
    client: Mutex<Option<Client>>,
    connection_task: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl PostgresConnection {
    /// Connect to a PostgreSQL database
    ///
    /// `url` is a `postgres://` / `postgresql://` URL or a key/value
    /// connection string, as understood by `tokio_postgres::Config`.
    pub async fn connect(url: &str) -> Result<Self> {
        tracing::info!("connecting to PostgreSQL database");

        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .map_err(|e| TckitError::Connection(format_postgres_error(&e)))?;

        let connection_task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "PostgreSQL connection terminated with error");
            }
        });

        tracing::debug!("PostgreSQL connection established");
        Ok(Self {
            client: Mutex::new(Some(client)),
            connection_task: Mutex::new(Some(connection_task)),
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Connection for PostgresConnection {
    fn driver_name(&self) -> &str {
        "postgresql"
    }

    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str) -> Result<u64> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| TckitError::Connection("PostgreSQL connection is closed".into()))?;

        let rows_affected = client
            .execute(sql, &[])
            .await
            .map_err(|e| TckitError::Query(format_postgres_error(&e)))?;

        tracing::debug!(affected_rows = rows_affected, "statement executed");
        Ok(rows_affected)
    }

    fn as_table_metadata(&self) -> Option<&dyn TableMetadata> {
        Some(self)
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        // dropping the client ends the connection future
        let client = self.client.lock().await.take();
        drop(client);

        if let Some(task) = self.connection_task.lock().await.take() {
            tracing::debug!("closing PostgreSQL connection");
            task.await
                .map_err(|e| TckitError::Connection(format!("Connection task failed: {}", e)))?;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return true;
        }
        match self.client.try_lock() {
            Ok(guard) => guard.as_ref().is_none_or(Client::is_closed),
            // in use, so still open
            Err(_) => false,
        }
    }
}

#[async_trait]
impl TableMetadata for PostgresConnection {
    #[tracing::instrument(skip(self))]
    async fn list_tables_matching(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table_pattern: &str,
    ) -> Result<Vec<TableRef>> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| TckitError::Connection("PostgreSQL connection is closed".into()))?;

        let params: [&(dyn ToSql + Sync); 3] = [&catalog, &schema, &table_pattern];
        let rows = client
            .query(LIST_TABLES_SQL, &params)
            .await
            .map_err(|e| TckitError::Metadata(format_postgres_error(&e)))?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let catalog: Option<String> = row
                .try_get(0)
                .map_err(|e| TckitError::Metadata(e.to_string()))?;
            let schema: Option<String> = row
                .try_get(1)
                .map_err(|e| TckitError::Metadata(e.to_string()))?;
            let name: String = row
                .try_get(2)
                .map_err(|e| TckitError::Metadata(e.to_string()))?;
            tables.push(TableRef {
                catalog,
                schema,
                name,
            });
        }

        tracing::debug!(table_count = tables.len(), "tables listed");
        Ok(tables)
    }
}
