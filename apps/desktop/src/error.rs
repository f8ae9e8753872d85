//! # API Error Type
//!
//! Unified error type returned by every command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockbook                              │
//! │                                                                         │
//! │  UI action ──► command fn ──► Result<T, ApiError>                       │
//! │                     │                                                   │
//! │                     ├── CoreError / ValidationError ─┐                  │
//! │                     ├── DbError ─────────────────────┼──► ApiError      │
//! │                     └── io::Error / csv::Error ──────┘    { code,       │
//! │                                                             message }   │
//! │                                                                         │
//! │  The UI switches on `code` and shows `message` as is.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is the only place errors turn into user-facing text. Persistence
//! details are logged here and replaced with a generic message.

use serde::Serialize;
use stockbook_core::{CoreError, ValidationError};
use stockbook_db::DbError;

/// Error returned from commands.
///
/// ```json
/// { "code": "INSUFFICIENT_STOCK", "message": "Insufficient stock for Pen (#1): available 10, requested 99" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id or bill id
    NotFound,

    /// Malformed or out-of-range input
    ValidationError,

    /// Requested quantity exceeds stock on hand
    InsufficientStock,

    /// Commit attempted with no lines
    EmptyCart,

    /// Database unreadable or unwritable
    DatabaseError,

    /// Export or print file could not be written
    ExportError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn export(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ExportError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts domain errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::EmptyCart => {
                ApiError::new(ErrorCode::EmptyCart, "Add at least one item before generating a bill")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(e) => ApiError::from(e),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("File write failed: {}", err);
        ApiError::export(format!("Could not write file: {}", err))
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        tracing::error!("CSV export failed: {}", err);
        ApiError::export(format!("Could not write report: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_codes() {
        assert_eq!(
            ApiError::from(CoreError::ProductNotFound(4)),
            ApiError::new(ErrorCode::NotFound, "Product not found: 4")
        );
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::EmptyCart);

        let err = ApiError::from(DbError::from(CoreError::InsufficientStock {
            product_id: 1,
            name: "Pen".to_string(),
            available: 10,
            requested: 99,
        }));
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("available 10, requested 99"));
    }

    #[test]
    fn test_persistence_details_are_hidden() {
        let err = ApiError::from(DbError::QueryFailed("no such table: inventory".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("quantity must be positive");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "quantity must be positive");
    }
}
