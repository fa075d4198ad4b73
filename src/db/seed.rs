//! Seed data for local development and demos.
//!
//! Inserts the canonical specialties (idempotent, existing rows are
//! preserved) and a configurable number of randomly generated doctors.

use rand::Rng;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::specialties::SPECIALTY_NAMES;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carmen", "Dmitri", "Elena", "Farid", "Grace", "Hiroshi", "Ingrid", "Jonas",
    "Katya", "Liam", "Mariam", "Nadia", "Oscar", "Priya", "Quentin", "Rosa", "Samuel", "Tessa",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bianchi", "Costa", "Dubois", "Eriksson", "Fischer", "Garcia", "Hansen",
    "Ivanov", "Johansson", "Kowalski", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov",
    "Quinn", "Rossi", "Silva", "Tanaka",
];

const DESCRIPTIONS: &[&str] = &[
    "Accepting new patients.",
    "Over ten years of clinical experience.",
    "Focused on preventive care and long-term follow-up.",
    "Fluent in English and one other language.",
    "Available for same-week appointments.",
];

/// Summary of a seeding run.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub specialties_inserted: u64,
    pub doctors_inserted: u64,
}

/// Insert the canonical specialties and `doctor_count` generated doctors.
pub async fn run(pool: &PgPool, doctor_count: usize) -> Result<SeedSummary, sqlx::Error> {
    let mut summary = SeedSummary::default();

    for name in SPECIALTY_NAMES {
        let result = sqlx::query(
            "INSERT INTO specialties (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(*name)
        .execute(pool)
        .await?;
        summary.specialties_inserted += result.rows_affected();
    }

    let specialty_ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM specialties")
        .fetch_all(pool)
        .await?;

    let mut rng = rand::thread_rng();
    for _ in 0..doctor_count {
        let id = Uuid::new_v4();
        let name = format!(
            "Dr. {} {}",
            FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
            LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())],
        );
        let specialty_id = specialty_ids[rng.gen_range(0..specialty_ids.len())];
        let phone_number = format!("+1{:010}", rng.gen_range(2_000_000_000u64..9_999_999_999));
        let avatar_url = format!("https://avatars.praxis.example/{}.png", id);
        let description = DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())];

        let result = sqlx::query(
            "INSERT INTO doctors (id, name, specialty_id, phone_number, avatar_url, description) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(name)
        .bind(specialty_id)
        .bind(phone_number)
        .bind(avatar_url)
        .bind(description)
        .execute(pool)
        .await?;
        summary.doctors_inserted += result.rows_affected();
    }

    info!(
        specialties = summary.specialties_inserted,
        doctors = summary.doctors_inserted,
        "seed complete"
    );

    Ok(summary)
}
