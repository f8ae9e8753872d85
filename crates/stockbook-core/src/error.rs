//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Malformed input                                │
//! │                                                                         │
//! │  stockbook-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures (wraps CoreError)             │
//! │                                                                         │
//! │  desktop API errors (in app)                                           │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → UI           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The core never turns these into display text for the user; the boundary
/// layer decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Referenced product id does not exist in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Requested quantity exceeds stock on hand.
    ///
    /// ## When This Occurs
    /// ```text
    /// add line (qty: 99) ──► stock check: available=10 ──► InsufficientStock
    /// commit             ──► decrement re-check         ──► InsufficientStock
    /// adjust (-20)       ──► 10 - 20 < 0                ──► InsufficientStock
    /// ```
    #[error("Insufficient stock for {name} (#{product_id}): available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Commit attempted on a cart with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be below zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. unparseable amount, unknown report kind).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// An amount whose minor units do not fit in an `i64`.
    pub fn amount_too_large(field: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "amount is too large".to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
