//! `PostgreSQL` storage for accepted reports.

pub mod pg_report_repository;

use sqlx::PgPool;
use sqlx::migrate::MigrateError;

/// Applies the bundled migrations to `pool`.
///
/// # Errors
///
/// Returns `MigrateError` if a migration cannot be applied.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
