//! # Repositories
//!
//! One repository per persisted entity type. Each owns a pool handle and the
//! SQL for its table.
//!
//! ```text
//! Database ──┬── inventory()     InventoryRepository    inventory table
//!            ├── transactions()  TransactionRepository  transactions table
//!            └── bills()         BillRepository         bills table
//! ```
//!
//! `load` on every repository degrades to an empty collection; writes
//! propagate [`DbError`](crate::DbError). The crate-private insert and
//! adjust helpers take a bare connection so the billing commit can run them
//! inside one SQL transaction.

pub mod bill;
pub mod inventory;
pub mod transaction;
