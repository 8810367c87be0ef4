use std::time::Duration;

use backdate_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the settings database and applies pending migrations.
pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to connect to settings database: {error}"))
        })?;

    let migrator = sqlx::migrate!("../../crates/infrastructure/migrations");
    migrator.run(&pool).await.map_err(|error| {
        AppError::Internal(format!("failed to apply backdate migrations: {error}"))
    })?;

    info!(
        migrations = migrator.iter().count(),
        max_connections, "settings database ready"
    );
    Ok(pool)
}
