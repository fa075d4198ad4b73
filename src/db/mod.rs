//! Database connection and data access.

pub mod doctors;
pub mod schema;
pub mod seed;
pub mod specialties;

use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use doctors::{DoctorFilter, DoctorRecord, DoctorRepository};
pub use specialties::{SPECIALTY_NAMES, SpecialtyFilter, SpecialtyRecord, SpecialtyRepository};

/// Database wrapper providing connection pool access.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database wrapper from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(10)
    }

    /// Create a new database connection pool.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(Self::max_connections())
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    /// Get the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a doctor repository.
    pub fn doctors(&self) -> DoctorRepository {
        DoctorRepository::new(self.pool.clone())
    }

    /// Get a specialty repository.
    pub fn specialties(&self) -> SpecialtyRepository {
        SpecialtyRepository::new(self.pool.clone())
    }
}
