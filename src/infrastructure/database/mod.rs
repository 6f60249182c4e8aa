//! PostgreSQL bootstrap: pool creation with retry and idempotent schema setup.

mod postgres_repository;


pub use postgres_repository::create_postgres_repository;

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Tables the service reads from. Safe to run on every startup.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS portfolio (
        id SERIAL PRIMARY KEY,
        section TEXT UNIQUE NOT NULL,
        content TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS entries (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

/// Connects to PostgreSQL, retrying while the server is unreachable, then
/// ensures the schema exists.
///
/// The database often starts alongside the service (compose, k8s), so the
/// first attempts are expected to fail. Each failure is logged and followed
/// by `retry_delay` before the next attempt.
///
/// # Errors
/// Returns the last connection error once `retry_count` attempts are spent,
/// or any error raised while creating tables.
pub async fn init_database_with_retry(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let attempts = config.retry_count.max(1);
    let mut attempt = 0;

    let pool = loop {
        attempt += 1;

        let result = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options.clone())
            .await;

        match result {
            Ok(pool) => break pool,
            Err(err) if attempt < attempts => {
                tracing::warn!(
                    "Database connection attempt {attempt}/{attempts} failed: {err}; retrying in {:?}",
                    config.retry_delay
                );
                tokio::time::sleep(config.retry_delay).await;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("database unreachable after {attempts} attempts"));
            }
        }
    };

    tracing::info!("Connected to database after {attempt} attempt(s)");
    ensure_schema(&pool).await?;

    Ok(pool)
}

/// Creates the service tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    // ---
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to create schema")?;
    }

    tracing::debug!("Database schema ready");
    Ok(())
}
