//! Postgres access for the song library: pool setup, migrations, models,
//! and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Pool settings shared by [`create_pool`] and lazily connected pools.
///
/// `acquire_timeout` bounds how long a query waits for a connection. Keep it
/// below the HTTP request timeout so an unreachable database surfaces as a
/// query error rather than a request timeout.
pub fn pool_options(acquire_timeout: Duration) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(acquire_timeout)
}

/// Create a connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    pool_options(acquire_timeout).connect(database_url).await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
