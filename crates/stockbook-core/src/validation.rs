//! # Validation Module
//!
//! Input validation for creation and adjustment operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI form                                                      │
//! │  └── Text → number parsing (Money::parse_decimal, integer fields)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (non-negative stock, positive sale qty)  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE product_id                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ```rust
/// use stockbook_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Notebook").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name)
}

/// Validates a supplier name for a purchase order.
pub fn validate_supplier_name(supplier: &str) -> ValidationResult<()> {
    validate_required_text("supplier", supplier)
}

fn validate_required_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity being sold or added (must be > 0).
pub fn validate_positive_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level or threshold (must be >= 0).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates every field of a new product at once.
///
/// ```rust
/// use stockbook_core::money::Money;
/// use stockbook_core::validation::validate_new_product;
///
/// assert!(validate_new_product("Notebook", 20, Money::from_cents(250), 5).is_ok());
/// assert!(validate_new_product("Notebook", -1, Money::from_cents(250), 5).is_err());
/// ```
pub fn validate_new_product(
    name: &str,
    quantity: i64,
    price: Money,
    min_stock: i64,
) -> ValidationResult<()> {
    validate_product_name(name)?;
    validate_non_negative("quantity", quantity)?;
    validate_price(price)?;
    validate_non_negative("min_stock", min_stock)?;
    Ok(())
}

/// Parses an integer typed into a form field.
///
/// ```rust
/// use stockbook_core::validation::parse_integer;
///
/// assert_eq!(parse_integer("quantity", " 12 ").unwrap(), 12);
/// assert!(parse_integer("quantity", "12.5").is_err());
/// ```
pub fn parse_integer(field: &str, input: &str) -> ValidationResult<i64> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected a whole number".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Pen").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_positive_quantity() {
        assert!(validate_positive_quantity("quantity", 1).is_ok());
        assert!(validate_positive_quantity("quantity", 0).is_err());
        assert!(validate_positive_quantity("quantity", -3).is_err());
    }

    #[test]
    fn test_validate_new_product_reports_first_bad_field() {
        let err = validate_new_product("Pen", 1, Money::from_cents(-1), 0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MustBeNonNegative {
                field: "price".to_string()
            }
        );

        let err = validate_new_product("Pen", 1, Money::zero(), -5).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MustBeNonNegative {
                field: "min_stock".to_string()
            }
        );

        assert!(validate_new_product("Pen", 0, Money::zero(), 0).is_ok());
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("quantity", "-4").unwrap(), -4);
        assert!(matches!(
            parse_integer("quantity", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_integer("quantity", "four"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
