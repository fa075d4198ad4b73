//! Specialty records, the specialty filter, and by-id access.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::orm::{Entity, Filter, SelectQuery, SqlValue};

/// The canonical set of specialties seeded into every installation.
pub const SPECIALTY_NAMES: &[&str] = &[
    "cardiology",
    "dermatology",
    "endocrinology",
    "gastroenterology",
    "neurology",
    "oncology",
    "orthopedics",
    "pediatrics",
    "psychiatry",
    "urology",
];

/// Specialty row from the database.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SpecialtyRecord {
    pub id: Uuid,
    pub name: String,
}

impl Entity for SpecialtyRecord {
    const TABLE_NAME: &'static str = "specialties";

    fn column_names() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn id_value(raw: &str) -> Option<SqlValue> {
        Uuid::parse_str(raw).ok().map(SqlValue::Uuid)
    }
}

/// Caller-supplied filter for specialty listings: exact name match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialtyFilter {
    pub name: Option<String>,
}

impl SpecialtyFilter {
    fn name_trimmed(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl Filter for SpecialtyFilter {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    fn to_sql_conditions(&self) -> (Vec<String>, Vec<SqlValue>) {
        match self.name_trimmed() {
            Some(name) => (
                vec!["name = ?".to_string()],
                vec![SqlValue::String(name.to_string())],
            ),
            None => (Vec::new(), Vec::new()),
        }
    }

    fn is_empty(&self) -> bool {
        self.name_trimmed().is_none()
    }
}

/// By-id access for specialties.
pub struct SpecialtyRepository {
    pool: PgPool,
}

impl SpecialtyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<SpecialtyRecord>, sqlx::Error> {
        SelectQuery::new()
            .equal("id", SqlValue::Uuid(id))
            .fetch_optional(&self.pool)
            .await
    }
}
