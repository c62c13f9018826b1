//! Table references and name normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// A table found by a metadata listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// Create a reference to an unqualified table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Set the catalog
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Set the schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Fully-qualified name, see [`normalize_table_name`]
    pub fn qualified_name(&self) -> String {
        normalize_table_name(self.catalog.as_deref(), self.schema.as_deref(), &self.name)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Build a fully-qualified table name from its components.
///
/// Segments are joined with `.`; blank catalog or schema segments are
/// skipped. The table segment is always written, even when blank.
pub fn normalize_table_name(catalog: Option<&str>, schema: Option<&str>, table: &str) -> String {
    let mut name = String::with_capacity(table.len() + 16);
    for segment in [catalog, schema].into_iter().flatten() {
        if !segment.trim().is_empty() {
            name.push_str(segment);
            name.push('.');
        }
    }
    name.push_str(table);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_skips_missing_segments() {
        assert_eq!(normalize_table_name(Some("app"), None, "users"), "app.users");
        assert_eq!(normalize_table_name(None, None, "users"), "users");
        assert_eq!(normalize_table_name(None, Some("public"), "users"), "public.users");
        assert_eq!(
            normalize_table_name(Some("app"), Some("public"), "users"),
            "app.public.users"
        );
    }

    #[test]
    fn test_normalize_skips_blank_segments() {
        assert_eq!(normalize_table_name(Some(""), Some("  "), "users"), "users");
    }

    #[test]
    fn test_table_ref_display() {
        let table = TableRef::new("orders").with_schema("sales");
        assert_eq!(table.to_string(), "sales.orders");
        assert_eq!(TableRef::new("orders").qualified_name(), "orders");
    }
}
