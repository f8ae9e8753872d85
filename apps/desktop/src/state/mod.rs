//! # State Module
//!
//! Application state handed to the commands, split by concern so each
//! command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌────────────────────┐  ┌──────────────────┐         │
//! │  │   DbState    │  │   BillingState     │  │   ConfigState    │         │
//! │  │              │  │                    │  │                  │         │
//! │  │  Database    │  │  Mutex<            │  │  store_name      │         │
//! │  │  (SQLite     │  │    BillingEngine   │  │  currency        │         │
//! │  │   pool)      │  │  >                 │  │  export_dir      │         │
//! │  └──────────────┘  └────────────────────┘  └──────────────────┘         │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • DbState: the pool is thread-safe                                     │
//! │  • BillingState: one writer at a time through the async mutex           │
//! │  • ConfigState: read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod billing;
mod config;
mod db;

pub use billing::BillingState;
pub use config::{ConfigState, ENV_DB_PATH, ENV_EXPORT_DIR, ENV_STORE_NAME};
pub use db::DbState;
