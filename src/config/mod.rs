//! Application configuration management.

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// PostgreSQL connection URL
    pub database_url: String,

    /// Number of doctors the seed binary generates
    pub seed_doctors: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,

            seed_doctors: env::var("SEED_DOCTORS")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .context("Invalid SEED_DOCTORS")?,
        })
    }
}
