//! SQL query builder for listing endpoints.
//!
//! Accumulates WHERE conditions, ordering and pagination bounds, then
//! renders parameterized PostgreSQL. The builder never executes SQL on its
//! own behalf; execution helpers bind the collected values and run against
//! a caller-supplied pool.

use sqlx::PgPool;

use super::traits::{Entity, Filter, OrderDirection, SqlValue};

/// A query builder for database entities.
///
/// Conditions arrive as fragments with `?` placeholders (so contributors
/// never need to know their parameter index) and are rewritten to `$N` in
/// registration order. The matching COUNT query is rendered from the same
/// accumulated filter state, so count metadata and page contents always
/// reflect the same WHERE clause.
#[derive(Debug)]
pub struct SelectQuery<E: Entity> {
    where_clauses: Vec<String>,
    values: Vec<SqlValue>,
    order_by: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    param_counter: usize,
    _marker: std::marker::PhantomData<E>,
}

impl<E: Entity> SelectQuery<E> {
    pub fn new() -> Self {
        Self {
            where_clauses: Vec::new(),
            values: Vec::new(),
            order_by: None,
            limit: None,
            offset: None,
            param_counter: 0,
            _marker: std::marker::PhantomData,
        }
    }

    /// Add a filter's conditions to the query. Empty filters add nothing.
    pub fn filter<F: Filter + ?Sized>(mut self, filter: &F) -> Self {
        if !filter.is_empty() {
            let (conditions, values) = filter.to_sql_conditions();
            for condition in conditions {
                let rewritten = self.rewrite_params(&condition);
                self.where_clauses.push(rewritten);
            }
            self.values.extend(values);
        }
        self
    }

    /// Add a raw WHERE clause condition with one bound value.
    pub fn where_clause(mut self, condition: &str, value: SqlValue) -> Self {
        let rewritten = self.rewrite_params(condition);
        self.where_clauses.push(rewritten);
        self.values.push(value);
        self
    }

    /// `column = ?`
    pub fn equal(self, column: &str, value: SqlValue) -> Self {
        self.where_clause(&format!("{} = ?", column), value)
    }

    /// `column LIKE ?`
    pub fn like(self, column: &str, value: SqlValue) -> Self {
        self.where_clause(&format!("{} LIKE ?", column), value)
    }

    /// `column > ?`
    pub fn greater_than(self, column: &str, value: SqlValue) -> Self {
        self.where_clause(&format!("{} > ?", column), value)
    }

    /// `column < ?`
    pub fn less_than(self, column: &str, value: SqlValue) -> Self {
        self.where_clause(&format!("{} < ?", column), value)
    }

    /// Add sorting to the query.
    pub fn order_by(mut self, column: &str, direction: OrderDirection) -> Self {
        self.order_by = Some(format!("{} {}", column, direction.to_sql()));
        self
    }

    /// Set the row limit.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the row offset.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Rewrite `?` placeholders to sequential `$N` parameters.
    fn rewrite_params(&mut self, condition: &str) -> String {
        let mut result = condition.to_string();
        while let Some(pos) = result.find('?') {
            self.param_counter += 1;
            result.replace_range(pos..pos + 1, &format!("${}", self.param_counter));
        }
        result
    }

    /// Render the data query.
    pub fn build_sql(&self) -> String {
        let mut sql = E::select_sql();

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            if offset > 0 {
                sql.push_str(&format!(" OFFSET {}", offset));
            }
        }

        sql
    }

    /// Render the COUNT query: same WHERE fragments and bind values, no
    /// ordering or bounds.
    pub fn build_count_sql(&self) -> String {
        let mut sql = format!("SELECT COUNT(*) FROM {}", E::TABLE_NAME);

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        sql
    }

    /// The values bound to the query, in placeholder order.
    pub fn bind_values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Execute the COUNT query.
    pub async fn count(&self, pool: &PgPool) -> Result<i64, sqlx::Error> {
        let sql = self.build_count_sql();
        tracing::debug!(sql = %sql, "executing count query");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &self.values {
            query = match value {
                SqlValue::String(s) => query.bind(s.as_str()),
                SqlValue::Int(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
                SqlValue::Bool(b) => query.bind(*b),
                SqlValue::Uuid(u) => query.bind(*u),
                SqlValue::Null => query.bind(None::<String>),
            };
        }

        query.fetch_one(pool).await
    }
}

impl<E> SelectQuery<E>
where
    E: Entity + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    /// Execute the query and return all matching entities.
    pub async fn fetch_all(self, pool: &PgPool) -> Result<Vec<E>, sqlx::Error> {
        let sql = self.build_sql();
        tracing::debug!(sql = %sql, "executing entity query");

        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in &self.values {
            query = match value {
                SqlValue::String(s) => query.bind(s.as_str()),
                SqlValue::Int(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
                SqlValue::Bool(b) => query.bind(*b),
                SqlValue::Uuid(u) => query.bind(*u),
                SqlValue::Null => query.bind(None::<String>),
            };
        }

        query.fetch_all(pool).await
    }

    /// Execute the query and return a single optional entity.
    pub async fn fetch_optional(self, pool: &PgPool) -> Result<Option<E>, sqlx::Error> {
        let sql = self.build_sql();
        tracing::debug!(sql = %sql, "executing entity query (one)");

        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in &self.values {
            query = match value {
                SqlValue::String(s) => query.bind(s.as_str()),
                SqlValue::Int(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
                SqlValue::Bool(b) => query.bind(*b),
                SqlValue::Uuid(u) => query.bind(*u),
                SqlValue::Null => query.bind(None::<String>),
            };
        }

        query.fetch_optional(pool).await
    }
}

impl<E: Entity> Default for SelectQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ValidationErrors;

    struct TestRecord;

    impl Entity for TestRecord {
        const TABLE_NAME: &'static str = "records";

        fn column_names() -> &'static [&'static str] {
            &["id", "name"]
        }

        fn id(&self) -> String {
            String::new()
        }
    }

    struct NameFilter {
        name: Option<String>,
    }

    impl Filter for NameFilter {
        fn validate(&self) -> Result<(), ValidationErrors> {
            Ok(())
        }

        fn to_sql_conditions(&self) -> (Vec<String>, Vec<SqlValue>) {
            match &self.name {
                Some(name) => (
                    vec!["name LIKE ?".to_string()],
                    vec![SqlValue::String(format!("%{}%", name))],
                ),
                None => (Vec::new(), Vec::new()),
            }
        }

        fn is_empty(&self) -> bool {
            self.name.is_none()
        }
    }

    #[test]
    fn bare_query_selects_all_columns() {
        let query = SelectQuery::<TestRecord>::new();
        assert_eq!(query.build_sql(), "SELECT id, name FROM records");
    }

    #[test]
    fn placeholders_number_in_registration_order() {
        let query = SelectQuery::<TestRecord>::new()
            .filter(&NameFilter {
                name: Some("smith".to_string()),
            })
            .greater_than("id", SqlValue::Int(5));

        assert_eq!(
            query.build_sql(),
            "SELECT id, name FROM records WHERE name LIKE $1 AND id > $2"
        );
        assert_eq!(
            query.bind_values(),
            &[
                SqlValue::String("%smith%".to_string()),
                SqlValue::Int(5),
            ]
        );
    }

    #[test]
    fn empty_filter_adds_nothing() {
        let query = SelectQuery::<TestRecord>::new().filter(&NameFilter { name: None });

        assert_eq!(query.build_sql(), "SELECT id, name FROM records");
        assert!(query.bind_values().is_empty());
    }

    #[test]
    fn count_query_shares_where_but_not_bounds() {
        let query = SelectQuery::<TestRecord>::new()
            .equal("name", SqlValue::String("x".to_string()))
            .order_by("id", OrderDirection::Desc)
            .limit(10)
            .offset(20);

        assert_eq!(
            query.build_sql(),
            "SELECT id, name FROM records WHERE name = $1 ORDER BY id DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            query.build_count_sql(),
            "SELECT COUNT(*) FROM records WHERE name = $1"
        );
    }

    #[test]
    fn zero_offset_is_omitted() {
        let query = SelectQuery::<TestRecord>::new().limit(10).offset(0);
        assert_eq!(query.build_sql(), "SELECT id, name FROM records LIMIT 10");
    }
}
