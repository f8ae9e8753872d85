//! # stockbook-db: Storage Layer for Stockbook
//!
//! The inventory, sales log and bill ledger stores on a local SQLite file,
//! plus the billing engine that commits a cart across all three atomically.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Data Flow                              │
//! │                                                                         │
//! │  stockbook-desktop command (commit_bill)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockbook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐   ┌───────────────────┐   ┌──────────────┐   │   │
//! │  │   │  Database   │   │   Repositories    │   │  Migrations  │   │   │
//! │  │   │  (pool.rs)  │◄──│ Inventory         │   │  (embedded)  │   │   │
//! │  │   │             │   │ Transaction log   │   │ 001_init.sql │   │   │
//! │  │   │ SqlitePool  │   │ Bill ledger       │   └──────────────┘   │   │
//! │  │   └──────▲──────┘   └───────────────────┘                      │   │
//! │  │          │                                                      │   │
//! │  │   ┌──────┴──────────────────────┐                               │   │
//! │  │   │ BillingEngine (billing.rs)  │ cart + one-transaction commit │   │
//! │  │   └─────────────────────────────┘                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stockbook.db (platform data dir, or STOCKBOOK_DB_PATH)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("stockbook.db")).await?;
//!
//! let mut engine = db.billing();
//! engine.add_line_item(1, 4).await?;
//! let receipt = engine.commit(Some("Alice")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::BillingEngine;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::bill::BillRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::transaction::TransactionRepository;
