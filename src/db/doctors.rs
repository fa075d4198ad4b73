//! Doctor records, the doctor search filter, and by-id access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::orm::{Entity, Filter, SelectQuery, SqlValue};

/// Doctor row from the database.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DoctorRecord {
    pub id: Uuid,
    pub name: String,
    pub specialty_id: Uuid,
    pub phone_number: String,
    pub avatar_url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for DoctorRecord {
    const TABLE_NAME: &'static str = "doctors";

    fn column_names() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "specialty_id",
            "phone_number",
            "avatar_url",
            "description",
            "created_at",
            "updated_at",
        ]
    }

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn id_value(raw: &str) -> Option<SqlValue> {
        Uuid::parse_str(raw).ok().map(SqlValue::Uuid)
    }
}

const MAX_NAME_LENGTH: usize = 100;

/// Caller-supplied search filter for doctor listings: substring match on
/// the name, equality on the specialty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub specialty_id: Option<Uuid>,
}

impl DoctorFilter {
    fn name_trimmed(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl Filter for DoctorFilter {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = self.name_trimmed() {
            if name.chars().count() > MAX_NAME_LENGTH {
                errors.push(
                    "name",
                    format!("must be at most {} characters", MAX_NAME_LENGTH),
                );
            }
        }
        errors.into_result()
    }

    fn to_sql_conditions(&self) -> (Vec<String>, Vec<SqlValue>) {
        let mut conditions = Vec::new();
        let mut values = Vec::new();

        if let Some(name) = self.name_trimmed() {
            conditions.push("name LIKE ?".to_string());
            values.push(SqlValue::String(format!("%{}%", name)));
        }
        if let Some(specialty_id) = self.specialty_id {
            conditions.push("specialty_id = ?".to_string());
            values.push(SqlValue::Uuid(specialty_id));
        }

        (conditions, values)
    }

    fn is_empty(&self) -> bool {
        self.name_trimmed().is_none() && self.specialty_id.is_none()
    }
}

/// By-id access for doctors.
pub struct DoctorRepository {
    pool: PgPool,
}

impl DoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<DoctorRecord>, sqlx::Error> {
        SelectQuery::new()
            .equal("id", SqlValue::Uuid(id))
            .fetch_optional(&self.pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pagination::{CursorPaginator, CursorQuery, PaginationError, Paginator,
        encode_cursor};

    #[test]
    fn whitespace_only_filter_adds_no_conditions() {
        let filter = DoctorFilter {
            name: Some("   ".to_string()),
            specialty_id: None,
        };

        assert!(filter.is_empty());
        let (conditions, values) = filter.to_sql_conditions();
        assert!(conditions.is_empty());
        assert!(values.is_empty());

        let query = SelectQuery::<DoctorRecord>::new().filter(&filter);
        assert!(!query.build_sql().contains("WHERE"));
    }

    #[test]
    fn full_filter_adds_two_anded_conditions_in_order() {
        let specialty_id = Uuid::new_v4();
        let filter = DoctorFilter {
            name: Some("John".to_string()),
            specialty_id: Some(specialty_id),
        };

        let query = SelectQuery::<DoctorRecord>::new().filter(&filter);
        let sql = query.build_sql();

        assert!(sql.contains("WHERE name LIKE $1 AND specialty_id = $2"));
        assert_eq!(
            query.bind_values(),
            &[
                SqlValue::String("%John%".to_string()),
                SqlValue::Uuid(specialty_id),
            ]
        );
    }

    #[test]
    fn overlong_name_fails_validation() {
        let filter = DoctorFilter {
            name: Some("x".repeat(101)),
            specialty_id: None,
        };

        let errs = filter.validate().unwrap_err();
        assert_eq!(errs.errors()[0].field, "name");
    }

    #[test]
    fn cursor_key_must_be_a_uuid() {
        assert!(DoctorRecord::id_value("not-a-uuid").is_none());

        // The token decodes fine but the payload is not a doctor key.
        let params = CursorQuery {
            cursor: Some(encode_cursor("123")),
            ordering: None,
            limit: Some(10),
        }
        .validate("http://example.com/api/public/doctors")
        .unwrap();

        let paginator = CursorPaginator::<DoctorRecord>::new(params);
        let err = paginator.paginate(SelectQuery::new()).unwrap_err();
        assert_matches!(err, PaginationError::InvalidCursor);
    }

    #[test]
    fn cursor_key_binds_native_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(
            DoctorRecord::id_value(&id.to_string()),
            Some(SqlValue::Uuid(id))
        );
    }
}
