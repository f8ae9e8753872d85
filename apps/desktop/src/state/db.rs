//! # Database State
//!
//! Wraps the `Database` handle for the commands. The pool inside is
//! thread-safe, so commands read and write concurrently without a lock.

use stockbook_db::Database;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ```rust,ignore
    /// let low = find_under_stocked(&db_state.inner().inventory().load().await);
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
