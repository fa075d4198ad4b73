//! Schema bootstrap.
//!
//! Creates the two tables if absent. Statements are idempotent so startup
//! and the seed binary can both run them safely.

use sqlx::PgPool;

const CREATE_SPECIALTIES: &str = "\
CREATE TABLE IF NOT EXISTS specialties (
  id uuid PRIMARY KEY,
  name text NOT NULL UNIQUE
)";

const CREATE_DOCTORS: &str = "\
CREATE TABLE IF NOT EXISTS doctors (
  id uuid PRIMARY KEY,
  name text NOT NULL,
  specialty_id uuid NOT NULL REFERENCES specialties(id),
  phone_number text NOT NULL,
  avatar_url text NOT NULL,
  description text NOT NULL,
  created_at timestamptz NOT NULL DEFAULT now(),
  updated_at timestamptz NOT NULL DEFAULT now()
)";

const CREATE_DOCTOR_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS doctors_name_idx ON doctors (name)";

/// Create missing tables and indexes.
pub async fn init(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_SPECIALTIES).execute(pool).await?;
    sqlx::query(CREATE_DOCTORS).execute(pool).await?;
    sqlx::query(CREATE_DOCTOR_NAME_INDEX).execute(pool).await?;
    tracing::debug!("schema initialized");
    Ok(())
}
