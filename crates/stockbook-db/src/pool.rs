//! # Database Handle
//!
//! Opens the SQLite file behind all three stores and hands out repositories.
//!
//! ```text
//! DbConfig::new(path) / DbConfig::in_memory()
//!        │
//!        ▼
//! Database::new(config).await   ← open pool, run migrations
//!        │
//!        ├── inventory()     → InventoryRepository
//!        ├── transactions()  → TransactionRepository
//!        ├── bills()         → BillRepository
//!        └── billing()       → BillingEngine (cart + atomic commit)
//! ```
//!
//! File databases run in WAL mode. In-memory databases use a single
//! connection that is never recycled, since the data lives and dies with it.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::billing::BillingEngine;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::bill::BillRepository;
use crate::repository::inventory::InventoryRepository;
use crate::repository::transaction::TransactionRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/stockbook.db").max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Default: 4
    pub max_connections: u32,

    /// Default: 1
    pub min_connections: u32,

    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a database file. The file is created when missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Isolated throwaway database, used by tests and the seed dry run.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()));
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Cloneable handle to the store pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, applies pending migrations.
    ///
    /// ## Errors
    /// - `ConnectionFailed` if the file cannot be opened or created
    /// - `MigrationFailed` if the schema cannot be brought up to date
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening stockbook database"
        );

        let connect_options = config.connect_options()?;
        debug!(in_memory = config.is_in_memory(), "Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout);

        if config.is_in_memory() {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Database pool created");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Raw pool access for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.pool.clone())
    }

    pub fn bills(&self) -> BillRepository {
        BillRepository::new(self.pool.clone())
    }

    /// A fresh billing engine with an empty cart over this database.
    pub fn billing(&self) -> BillingEngine {
        BillingEngine::new(self.clone())
    }

    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// True when the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
