//! Environment configuration and pool construction.
//!
//! Settings come from the process environment (a `.env` file is loaded by the
//! binary before this runs). Pool options mirror the usual production knobs:
//! bounded size, hourly connection recycling, and a liveness check before
//! each acquire.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/registrar";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub pool_size: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(get: F) -> Self {
        Config {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            pool_size: get("POOL_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_POOL_SIZE),
        }
    }

    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.pool_size)
            .max_lifetime(Duration::from_secs(3600))
            .test_before_acquire(true)
            .connect(&self.database_url)
            .await
    }
}
