//! Seed the database with the canonical specialties and demo doctors.
//!
//! `SEED_DOCTORS` controls how many doctors are generated (default 50).

use praxis::config::Config;
use praxis::db::{Database, schema, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "praxis=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::connect(&config.database_url).await?;
    schema::init(db.pool()).await?;

    seed::run(db.pool(), config.seed_doctors).await?;
    Ok(())
}
