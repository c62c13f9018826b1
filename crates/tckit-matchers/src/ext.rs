//! Precondition constructors on connection providers

use tckit_core::ConnectionProvider;

use crate::{DropTableIfExists, TableExists, TablePattern};

/// Build table preconditions straight from a provider:
///
/// ```ignore
/// let container = PostgresContainer::start().await?;
/// container.drop_table_if_exists(None, Some("public"), "users%").evaluate().await?;
/// assert_precondition(&container.table_exists(None, Some("public"), "orders")).await?;
/// ```
pub trait TablePreconditions {
    fn table_exists(&self, catalog: Option<&str>, schema: Option<&str>, table: &str) -> TableExists<'_>;

    fn drop_table_if_exists(&self, catalog: Option<&str>, schema: Option<&str>, table: &str) -> DropTableIfExists<'_>;

    /// Like [`TablePreconditions::drop_table_if_exists`], but drops nothing
    /// when more than one table matches
    fn strict_drop_table_if_exists(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> DropTableIfExists<'_>;
}

impl<P: ConnectionProvider> TablePreconditions for P {
    fn table_exists(&self, catalog: Option<&str>, schema: Option<&str>, table: &str) -> TableExists<'_> {
        TableExists::new(self, TablePattern::from_parts(catalog, schema, table))
    }

    fn drop_table_if_exists(&self, catalog: Option<&str>, schema: Option<&str>, table: &str) -> DropTableIfExists<'_> {
        DropTableIfExists::new(self, TablePattern::from_parts(catalog, schema, table))
    }

    fn strict_drop_table_if_exists(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> DropTableIfExists<'_> {
        DropTableIfExists::strict(self, TablePattern::from_parts(catalog, schema, table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Precondition;
    use crate::test_support::FakeDatabase;
    use tckit_core::TableRef;

    #[tokio::test]
    async fn test_provider_builds_preconditions() {
        let db = FakeDatabase::with_tables([
            TableRef::new("a1").with_schema("app"),
            TableRef::new("a2").with_schema("app"),
        ]);

        assert!(db.table_exists(None, Some("app"), "a%").evaluate().await.unwrap().matched);
        assert!(db.strict_drop_table_if_exists(None, Some("app"), "a%").is_strict());

        db.strict_drop_table_if_exists(None, Some("app"), "a%")
            .evaluate()
            .await
            .unwrap();
        assert_eq!(db.table_names().len(), 2);

        db.drop_table_if_exists(None, Some("app"), "a%")
            .evaluate()
            .await
            .unwrap();
        assert!(db.table_names().is_empty());
        assert!(!db.table_exists(None, Some("app"), "a%").evaluate().await.unwrap().matched);
    }
}
