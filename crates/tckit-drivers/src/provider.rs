//! URL-backed connection provider

use async_trait::async_trait;
use std::sync::Arc;
use tckit_core::{Connection, ConnectionProvider, DatabaseDriver, Result, append_query};

/// A database reachable at a fixed URL.
///
/// This is the provider to hand to the table preconditions when the
/// database is already running, e.g. a container started by the test
/// harness whose mapped port is known.
#[derive(Clone)]
pub struct DatabaseUrl {
    url: String,
    driver: Arc<dyn DatabaseDriver>,
}

impl DatabaseUrl {
    pub fn new(url: impl Into<String>, driver: Arc<dyn DatabaseDriver>) -> Self {
        Self {
            url: url.into(),
            driver,
        }
    }

    /// Driver serving this URL
    pub fn driver(&self) -> &Arc<dyn DatabaseDriver> {
        &self.driver
    }
}

impl std::fmt::Debug for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseUrl")
            .field("url", &tckit_core::redact_url(&self.url))
            .field("driver", &self.driver.name())
            .finish()
    }
}

#[async_trait]
impl ConnectionProvider for DatabaseUrl {
    fn connection_url(&self) -> String {
        self.url.clone()
    }

    async fn create_connection(&self, query: &str) -> Result<Box<dyn Connection>> {
        self.driver.connect(&append_query(&self.url, query)).await
    }
}
