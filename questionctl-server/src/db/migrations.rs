//! Schema migrations
//!
//! Versioned SQL scripts live in the workspace `migrations/` directory and are
//! embedded at compile time. Applying them is idempotent.

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use super::DbError;

pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Apply all pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running question migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Question migrations complete");
    Ok(())
}
