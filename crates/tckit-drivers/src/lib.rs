//! tckit Drivers - Database driver implementations
//!
//! This crate bundles the concrete drivers behind cargo features and
//! provides a registry that turns a connection URL into a
//! `ConnectionProvider`.

#[cfg(feature = "postgres")]
pub use tckit_driver_postgres as postgres;
#[cfg(feature = "sqlite")]
pub use tckit_driver_sqlite as sqlite;

mod provider;
mod registry;

pub use provider::DatabaseUrl;
pub use registry::DriverRegistry;

/// Re-export commonly used types from tckit-core
pub use tckit_core::{
    Connection, ConnectionProvider, DatabaseDriver, Result, TableMetadata, TableRef, TckitError,
};
