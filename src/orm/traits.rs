//! Core traits for the query layer.
//!
//! Entities describe their table shape, filters contribute WHERE
//! conditions, and [`FilterSet`] composes independent filters into one
//! AND-combined predicate.

use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use uuid::Uuid;

use super::builder::SelectQuery;
use crate::error::ValidationErrors;

/// Metadata about a database entity (table).
///
/// Any record type with a stable identifier can participate in listing
/// queries and cursor pagination; there is no common base type.
pub trait Entity: Send + Sync {
    /// The SQL table name (e.g., "doctors")
    const TABLE_NAME: &'static str;

    /// The primary key column name
    const PRIMARY_KEY: &'static str = "id";

    /// List of all column names in the table
    fn column_names() -> &'static [&'static str];

    /// Build a SELECT query for all columns
    fn select_sql() -> String {
        let columns = Self::column_names().join(", ");
        format!("SELECT {} FROM {}", columns, Self::TABLE_NAME)
    }

    /// Stable identifier rendered as text, used for cursor tokens.
    fn id(&self) -> String;

    /// Convert a raw identifier (e.g., a decoded cursor) into a bindable
    /// key value. The default treats identifiers as text; entities with
    /// typed keys should parse here so key comparisons happen in the
    /// storage layer's native ordering.
    fn id_value(raw: &str) -> Option<SqlValue> {
        Some(SqlValue::String(raw.to_owned()))
    }
}

/// Sort direction for ORDER BY clauses and the `ordering` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Convert to SQL order string
    pub fn to_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }

    /// The wire value used in `ordering` query parameters.
    pub fn as_param(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }

    /// Parse a wire value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(OrderDirection::Asc),
            "desc" => Some(OrderDirection::Desc),
            _ => None,
        }
    }
}

/// Represents a SQL value that can be bound to a query.
///
/// Used by filters and paginators to collect values for parameterized
/// queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(Uuid),
    Null,
}

impl SqlValue {
    /// Bind this value to a sqlx query
    pub fn bind_to_query<'q>(
        &'q self,
        query: sqlx::query::Query<'q, Postgres, PgArguments>,
    ) -> sqlx::query::Query<'q, Postgres, PgArguments> {
        match self {
            SqlValue::String(s) => query.bind(s.as_str()),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Uuid(u) => query.bind(*u),
            SqlValue::Null => query.bind(None::<String>),
        }
    }
}

/// A predicate contributor for listing queries.
///
/// Filters are value types owned by the caller. `validate` checks the
/// filter's own fields; `to_sql_conditions` returns WHERE fragments (with
/// `?` placeholders) and the values to bind, in registration order. A
/// filter whose fields are all empty must return no conditions.
pub trait Filter: Send + Sync {
    /// Validate this filter's fields, reporting every failure.
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// WHERE clause fragments and the values to bind.
    fn to_sql_conditions(&self) -> (Vec<String>, Vec<SqlValue>);

    /// Check if the filter has any conditions
    fn is_empty(&self) -> bool;
}

/// An ordered collection of filters combined with logical AND.
#[derive(Default)]
pub struct FilterSet {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, keeping registration order.
    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Validate every member filter, merging all failures into one error
    /// so the caller sees the complete list of field problems at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for filter in &self.filters {
            if let Err(errs) = filter.validate() {
                errors.merge(errs);
            }
        }
        errors.into_result()
    }

    /// Apply each filter's conditions to the query in registration order.
    pub fn apply<E: Entity>(&self, query: SelectQuery<E>) -> SelectQuery<E> {
        self.filters
            .iter()
            .fold(query, |query, filter| query.filter(filter.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
