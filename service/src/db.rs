//! Database pool setup and startup migrations.

use std::path::Path;
use std::time::{Duration, Instant};

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Connect to the database with bounded retry, then run migrations.
///
/// Postgres is often still coming up when the service starts (container
/// orchestration); connection attempts back off exponentially within an
/// overall retry budget before giving up.
///
/// # Errors
///
/// Returns an error when the retry budget is exhausted or migrations fail.
pub async fn setup_database(config: &DatabaseConfig) -> Result<PgPool, anyhow::Error> {
    let retry_deadline = Duration::from_secs(60); // overall retry budget
    let max_interval = Duration::from_secs(30); // cap single waits
    let mut delay = Duration::from_millis(500);
    let start = Instant::now();

    let url = config.connection_url();

    let pool = loop {
        info!("Attempting to connect to Postgres...");

        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            // Allow extra time to acquire a connection during startup bursts
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await
        {
            Ok(pool) => break pool,
            Err(err) => {
                if start.elapsed() >= retry_deadline {
                    warn!(error = %err, "Postgres not ready; retries exhausted");
                    return Err(err.into());
                }

                warn!(error = %err, "Postgres not ready yet; retrying");
                sleep(delay).await;
                delay = (delay.saturating_mul(2)).min(max_interval);
            }
        }
    };

    // Migrations live in the crate by default; deployments can point elsewhere.
    let default_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");
    let migrations_dir = config.migrations_dir.as_deref().unwrap_or(default_dir);

    let migrator = Migrator::new(Path::new(migrations_dir)).await?;
    migrator.run(&pool).await?;
    info!("Migrations applied");

    Ok(pool)
}
