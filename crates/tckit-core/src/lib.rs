//! tckit Core - Core abstractions shared by the tckit crates
//!
//! This crate provides the collaborator traits that the log router and the
//! table preconditions are written against. It defines:
//!
//! - `Connection` - Trait for a live database connection
//! - `TableMetadata` - Trait for table listing through metadata introspection
//! - `ConnectionProvider` - Trait for anything that hands out connections
//!   (a running test container, a plain URL, a file database)
//! - `DatabaseDriver` - Trait for opening connections from a URL
//! - Common types like `TableRef`, plus name and pattern helpers

mod connection;
pub mod connection_url;
mod driver;
mod error;
pub mod pattern;
mod schema;

pub use connection::*;
pub use connection_url::{append_query, redact_url, url_scheme};
pub use driver::*;
pub use error::*;
pub use pattern::{PatternCase, like_match, strip_quotes};
pub use schema::*;
