//! tckit Matchers - Database preconditions for tests
//!
//! Preconditions run before a test body to put the database in a known
//! state, or to check that it is in one:
//!
//! - `TableExists` - passes iff at least one table matches a pattern
//! - `DropTableIfExists` - drops every matching table; the strict variant
//!   refuses to drop anything when more than one table matches
//! - `TablePreconditions` - builds the above from any `ConnectionProvider`
//! - `assert_precondition` - evaluates and turns a mismatch into an error
//!   with an `Expected: ... but: ...` message
//!
//! Each evaluation opens its own connection through the provider and
//! closes it again before returning, on success and on failure.

mod description;
mod drop_table;
mod error;
mod ext;
mod precondition;
mod table_exists;
mod tables;

#[cfg(test)]
mod test_support;

pub use description::Description;
pub use drop_table::DropTableIfExists;
pub use error::MatcherError;
pub use ext::TablePreconditions;
pub use precondition::{Evaluation, Precondition, assert_precondition};
pub use table_exists::TableExists;
pub use tables::{TablePattern, drop_tables, list_tables};
pub use tckit_core::normalize_table_name;
