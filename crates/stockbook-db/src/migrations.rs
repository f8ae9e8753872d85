//! # Schema Migrations
//!
//! SQL files under `migrations/sqlite/` are embedded at compile time and
//! applied in filename order. Applied versions are tracked by sqlx in the
//! `_sqlx_migrations` table, so running them again is a no-op.
//!
//! New schema changes go in a new `NNN_description.sql` file; existing files
//! are never edited once released.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(available = MIGRATOR.migrations.len(), "Applying pending migrations");
    MIGRATOR.run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// `(embedded, applied)` migration counts, for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied = match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
    {
        Ok(count) => count as usize,
        Err(err) => {
            warn!(error = %err, "Migration table unreadable");
            0
        }
    };

    Ok((total, applied))
}
