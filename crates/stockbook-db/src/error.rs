//! # Storage Error Types
//!
//! Everything a store operation can fail with: either a domain rule
//! (unknown product, not enough stock, bad input) or the SQLite file itself.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / MigrateError        CoreError (stockbook-core)           │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  DbError::{QueryFailed, ...}       DbError::Domain                      │
//! │       │                                 │                               │
//! │       └──────────────┬──────────────────┘                               │
//! │                      ▼                                                  │
//! │  ApiError (desktop command layer) ← stable code + message               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockbook_core::{CoreError, ValidationError};
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A domain rule rejected the operation. Nothing was written.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Saving an inventory that lists the same product id twice
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// The database file could not be opened or created.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Runtime SQL error, including CHECK constraint failures.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit of a SQL transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Returns the domain error when this failure was a rule violation.
    pub fn as_domain(&self) -> Option<&CoreError> {
        match self {
            DbError::Domain(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn transaction(err: sqlx::Error) -> Self {
        DbError::TransactionFailed(err.to_string())
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Domain(CoreError::Validation(err))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → UniqueViolation or QueryFailed
/// sqlx::Error::RowNotFound    → QueryFailed
/// sqlx::Error::PoolTimedOut   → PoolExhausted
/// sqlx::Error::PoolClosed     → ConnectionFailed
/// Other                       → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: inventory.product_id"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::RowNotFound => DbError::QueryFailed("no rows returned".to_string()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_message() {
        let err = DbError::from(CoreError::ProductNotFound(7));
        assert_eq!(err.to_string(), "Product not found: 7");
        assert_eq!(err.as_domain(), Some(&CoreError::ProductNotFound(7)));
    }

    #[test]
    fn test_validation_lifts_into_domain() {
        let err = DbError::from(ValidationError::Required {
            field: "name".to_string(),
        });
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[test]
    fn test_pool_timeout_maps_to_exhausted() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
    }
}
