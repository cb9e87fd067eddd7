use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Create a PostgreSQL connection pool
///
/// Connects eagerly so an unreachable database fails at startup rather than
/// on the first login.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        "Connecting to database {} on {}:{}...",
        config.name,
        config.host,
        config.port
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(config.connect_options())
        .await?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}
