//! Drop-table precondition

use async_trait::async_trait;
use tckit_core::ConnectionProvider;

use crate::tables::{close_connection, drop_tables, list_tables, open_connection};
use crate::{Description, Evaluation, MatcherError, Precondition, TablePattern};

/// Drops the tables matching a pattern.
///
/// The non-strict form drops every match. The strict form drops only when
/// exactly one table matches; with several matches nothing is dropped and
/// the matches are listed by [`Precondition::describe_mismatch`]. Both forms
/// always report success.
pub struct DropTableIfExists<'a> {
    provider: &'a dyn ConnectionProvider,
    pattern: TablePattern,
    strict: bool,
}

impl<'a> DropTableIfExists<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider, pattern: impl Into<TablePattern>) -> Self {
        Self {
            provider,
            pattern: pattern.into(),
            strict: false,
        }
    }

    pub fn strict(provider: &'a dyn ConnectionProvider, pattern: impl Into<TablePattern>) -> Self {
        Self {
            strict: true,
            ..Self::new(provider, pattern)
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn pattern(&self) -> &TablePattern {
        &self.pattern
    }

    fn tables_to_drop<'t>(&self, tables: &'t [String]) -> &'t [String] {
        if self.strict && tables.len() > 1 {
            &[]
        } else {
            tables
        }
    }
}

#[async_trait]
impl Precondition for DropTableIfExists<'_> {
    #[tracing::instrument(skip(self), fields(table = %self.pattern.qualified_name(), strict = self.strict))]
    async fn evaluate(&self) -> Result<Evaluation, MatcherError> {
        let url = self.provider.connection_url();
        let conn = open_connection(self.provider).await?;

        let result: Result<Evaluation, MatcherError> = async {
            let tables = list_tables(
                conn.as_ref(),
                &url,
                self.pattern.catalog.as_deref(),
                self.pattern.schema.as_deref(),
                &self.pattern.table,
            )
            .await?;

            let dropped = self.tables_to_drop(&tables).to_vec();
            if dropped.len() < tables.len() {
                tracing::warn!(matches = tables.len(), "more than one table matches, nothing dropped");
            }
            drop_tables(conn.as_ref(), &url, &dropped).await?;

            Ok(Evaluation {
                matched: true,
                tables,
                dropped,
            })
        }
        .await;

        close_connection(conn.as_ref()).await;
        result
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("Table ")
            .append_text(&self.pattern.qualified_name());
    }

    fn describe_mismatch(&self, evaluation: &Evaluation, description: &mut Description) {
        if self.strict && evaluation.tables.len() > 1 {
            description
                .append_text(&format!("Too many matches {}", evaluation.tables.len()))
                .append_value_list(" - ", "\n - ", "\n", &evaluation.tables);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeDatabase;
    use pretty_assertions::assert_eq;
    use tckit_core::TableRef;

    fn two_user_tables() -> FakeDatabase {
        FakeDatabase::with_tables([
            TableRef::new("users").with_schema("app"),
            TableRef::new("users_old").with_schema("app"),
            TableRef::new("orders").with_schema("app"),
        ])
    }

    #[tokio::test]
    async fn test_non_strict_drops_all_matches_in_order() {
        let db = two_user_tables();
        let drop = DropTableIfExists::new(&db, TablePattern::new("users%").in_schema("app"));

        let evaluation = drop.evaluate().await.unwrap();

        assert!(evaluation.matched);
        assert_eq!(evaluation.dropped, evaluation.tables);
        assert_eq!(
            db.statements(),
            vec![
                "DROP TABLE IF EXISTS app.users",
                "DROP TABLE IF EXISTS app.users_old"
            ]
        );
        assert_eq!(db.table_names(), vec!["app.orders".to_string()]);
        assert_eq!(db.connection_counts(), (1, 1));
    }

    #[tokio::test]
    async fn test_strict_with_two_matches_drops_nothing() {
        let db = two_user_tables();
        let drop = DropTableIfExists::strict(&db, TablePattern::new("users%").in_schema("app"));

        let evaluation = drop.evaluate().await.unwrap();

        assert!(evaluation.matched);
        assert!(evaluation.dropped.is_empty());
        assert!(db.statements().is_empty());
        assert_eq!(db.table_names().len(), 3);

        let mut mismatch = Description::new();
        drop.describe_mismatch(&evaluation, &mut mismatch);
        assert_eq!(
            mismatch.as_str(),
            "Too many matches 2 - \"app.users\"\n - \"app.users_old\"\n"
        );
    }

    #[tokio::test]
    async fn test_strict_with_one_match_drops_it() {
        let db = two_user_tables();
        let drop = DropTableIfExists::strict(&db, TablePattern::new("users").in_schema("app"));

        let evaluation = drop.evaluate().await.unwrap();

        assert_eq!(evaluation.dropped, vec!["app.users".to_string()]);
        assert_eq!(db.statements(), vec!["DROP TABLE IF EXISTS app.users"]);

        let mut mismatch = Description::new();
        drop.describe_mismatch(&evaluation, &mut mismatch);
        assert!(mismatch.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_a_noop() {
        for strict in [false, true] {
            let db = two_user_tables();
            let drop = if strict {
                DropTableIfExists::strict(&db, "missing")
            } else {
                DropTableIfExists::new(&db, "missing")
            };

            let evaluation = drop.evaluate().await.unwrap();
            assert!(evaluation.matched);
            assert!(evaluation.tables.is_empty());
            assert!(db.statements().is_empty());
        }
    }

    #[tokio::test]
    async fn test_quoted_pattern_drops_bare_table() {
        let db = two_user_tables();
        DropTableIfExists::new(&db, TablePattern::new("\"orders\"").in_schema("'app'"))
            .evaluate()
            .await
            .unwrap();
        assert_eq!(db.statements(), vec!["DROP TABLE IF EXISTS app.orders"]);
    }

    #[tokio::test]
    async fn test_drop_failure_closes_connection() {
        let db = two_user_tables();
        db.fail_drop_of("app.users");

        let err = DropTableIfExists::new(&db, TablePattern::new("users%").in_schema("app"))
            .evaluate()
            .await
            .unwrap_err();

        assert!(matches!(err, MatcherError::Drop { ref table, .. } if table == "app.users"));
        assert_eq!(db.statements(), vec!["DROP TABLE IF EXISTS app.users"]);
        assert_eq!(db.connection_counts(), (1, 1));
    }

    #[tokio::test]
    async fn test_repeated_evaluations_do_not_accumulate() {
        let db = two_user_tables();
        let drop = DropTableIfExists::new(&db, TablePattern::new("orders").in_schema("app"));

        let first = drop.evaluate().await.unwrap();
        let second = drop.evaluate().await.unwrap();

        assert_eq!(first.tables, vec!["app.orders".to_string()]);
        assert!(second.tables.is_empty());
        assert_eq!(db.connection_counts(), (2, 2));
    }
}
