//! # Billing State
//!
//! The one bill being rung up at the counter.
//!
//! ## Thread Safety
//! The engine sits behind a `tokio::sync::Mutex` because:
//! 1. Several commands touch the cart (add, set customer, clear, commit)
//! 2. Only one of them may change it at a time
//! 3. A commit awaits the database while holding the cart
//!
//! ```text
//! add_to_cart ──┐
//! set_customer ─┼──► lock().await ──► BillingEngine ──► release
//! commit_bill ──┘
//! ```

use tokio::sync::{Mutex, MutexGuard};

use stockbook_db::{BillingEngine, Database};

#[derive(Debug)]
pub struct BillingState {
    engine: Mutex<BillingEngine>,
}

impl BillingState {
    /// Starts with an empty cart over `db`.
    pub fn new(db: &Database) -> Self {
        BillingState {
            engine: Mutex::new(db.billing()),
        }
    }

    /// Exclusive access to the engine until the guard drops.
    pub async fn lock(&self) -> MutexGuard<'_, BillingEngine> {
        self.engine.lock().await
    }
}
