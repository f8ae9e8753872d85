//! # Stockbook Desktop Library
//!
//! The command layer a desktop UI calls into. It opens the database,
//! holds the application state and maps every UI action to one command.
//!
//! ## Module Organization
//! ```text
//! stockbook_desktop/
//! ├── main.rs         ◄─── Binary entry point, calls `run`
//! ├── lib.rs          ◄─── You are here (bootstrap & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── billing.rs  ◄─── The bill being rung up
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── One function per UI action
//! ├── render.rs       ◄─── Receipt / purchase order text
//! ├── export.rs       ◄─── CSV dataset export
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup
//! ```rust,ignore
//! stockbook_desktop::init_tracing();
//! let app = stockbook_desktop::bootstrap(ConfigState::from_env()).await?;
//! let cart = commands::cart::add_to_cart(&app.billing, &app.config, 1, 4).await?;
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod render;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{BillingState, ConfigState, DbState};
use stockbook_db::{Database, DbConfig};

/// Everything the commands need, created once at startup.
#[derive(Debug)]
pub struct AppState {
    pub db: DbState,
    pub billing: BillingState,
    pub config: ConfigState,
}

/// Opens (or creates) the database and builds the application state.
///
/// ## Startup Sequence
/// ```text
/// 1. Determine database path   STOCKBOOK_DB_PATH or the platform data dir
/// 2. Connect                   SQLite in WAL mode, pending migrations run
/// 3. Initialize state          DbState, empty BillingState, ConfigState
/// ```
pub async fn bootstrap(config: ConfigState) -> Result<AppState, ApiError> {
    let db_path = database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let billing = BillingState::new(&db);
    Ok(AppState {
        db: DbState::new(db),
        billing,
        config,
    })
}

/// Starts the application: logging, database, state, then a startup
/// summary of the stock position.
///
/// Kept in the library so the binary stays a one-liner and the startup
/// path is testable.
pub async fn run(config: ConfigState) -> Result<AppState, ApiError> {
    init_tracing();
    info!(store = %config.store_name, "Starting stockbook");

    let app = bootstrap(config).await?;
    let products = app.db.inner().inventory().count().await?;
    let report = commands::stock::low_stock_report(&app.db).await?;
    info!(products, health = ?report.health, "Inventory loaded");

    Ok(app)
}

/// Installs the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockbook=trace` - Trace for stockbook crates only
/// - Default: `info,stockbook=debug,sqlx=warn`
///
/// Calling it twice is harmless; the second call does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockbook=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Resolves the database file.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockbook.stockbook/stockbook.db`
/// - **Windows**: `%APPDATA%\stockbook\stockbook\data\stockbook.db`
/// - **Linux**: `~/.local/share/stockbook/stockbook.db`
///
/// `db_path` in the config (`STOCKBOOK_DB_PATH`) wins when set.
pub fn database_path(config: &ConfigState) -> Result<PathBuf, ApiError> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "stockbook", "stockbook")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("stockbook.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_override() {
        let config = ConfigState {
            db_path: Some(PathBuf::from("/tmp/shop.db")),
            ..ConfigState::default()
        };
        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/tmp/shop.db"));
    }

    #[tokio::test]
    async fn test_run_opens_existing_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            db_path: Some(dir.path().join("stockbook.db")),
            export_dir: dir.path().to_path_buf(),
            ..ConfigState::default()
        };

        let app = run(config.clone()).await.unwrap();
        app.db
            .inner()
            .inventory()
            .add_product("Pen", 2, stockbook_core::Money::from_cents(500), 5)
            .await
            .unwrap();
        app.db.inner().close().await;

        // A second start sees the stored product
        let app = run(config).await.unwrap();
        let report = commands::stock::low_stock_report(&app.db).await.unwrap();
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].needed, 3);
    }

    #[tokio::test]
    async fn test_bootstrap_creates_database_file() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let db_file = dir.path().join("stockbook.db");
        let config = ConfigState {
            db_path: Some(db_file.clone()),
            export_dir: dir.path().to_path_buf(),
            ..ConfigState::default()
        };

        let app = bootstrap(config).await.unwrap();

        assert!(db_file.exists());
        assert!(app.db.inner().inventory().load().await.is_empty());
        let cart = commands::cart::get_cart(&app.billing, &app.config)
            .await
            .unwrap();
        assert!(cart.items.is_empty());
    }
}
