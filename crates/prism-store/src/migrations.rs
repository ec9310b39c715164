//! # Database Migrations
//!
//! Embedded SQL migrations for Prism.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_initial_schema.sql   themes, users, user_themes, settings
//! ```
//!
//! Migrations are compiled into the binary and tracked in
//! `_sqlx_migrations`. Existing files are never edited; schema changes go
//! into a new `NNN_description.sql`.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations. Idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((total, applied as usize))
}
