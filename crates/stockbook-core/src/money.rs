//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    round(2.675, 2) = 2.67 (binary representation of 2.675 is lower)     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise)                              │
//! │    ₹2.50 is stored as 250                                               │
//! │    Tax at 5% on 250 = (250 × 500 + 5000) / 10000 = 13 (rounded)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockbook_core::money::Money;
//!
//! let price = Money::from_cents(500);              // ₹5.00
//! let line = price.checked_mul(4).unwrap();        // ₹20.00
//! let typed = Money::parse_decimal("price", "2.50").unwrap();
//! assert_eq!(typed.cents(), 250);
//! assert_eq!(line.to_string(), "₹20.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::ValidationError;
use crate::types::TaxRate;
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► LineItem.unit_price ──► LineItem.subtotal
///                                                      │
/// Cart subtotal ◄──────────────────────────────────────┘
///      │
///      ▼
/// Tax (5%) ──► Total ──► Receipt / BillLine
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // ₹10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses user-entered decimal text such as `"2.50"`, `"7"` or `"0.5"`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - At most two fractional digits
    /// - Negative amounts are rejected (prices are never negative)
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("price", "2.5").unwrap().cents(), 250);
    /// assert!(Money::parse_decimal("price", "2.505").is_err());
    /// assert!(Money::parse_decimal("price", "-1").is_err());
    /// ```
    pub fn parse_decimal(field: &str, input: &str) -> Result<Money, ValidationError> {
        let text = input.trim();

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        if text.starts_with('-') {
            return Err(ValidationError::MustBeNonNegative {
                field: field.to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };
        let too_large = || ValidationError::amount_too_large(field);

        let (major_text, minor_text) = match text.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (text, ""),
        };

        if major_text.is_empty() && minor_text.is_empty() {
            return Err(invalid("expected a decimal amount"));
        }

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(major_text) || !all_digits(minor_text) {
            return Err(invalid("expected a decimal amount"));
        }

        if minor_text.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let major: i64 = if major_text.is_empty() {
            0
        } else {
            major_text
                .parse()
                .map_err(|_| too_large())?
        };

        let minor: i64 = match minor_text.len() {
            0 => 0,
            1 => minor_text.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => minor_text.parse().map_err(|_| invalid("bad fraction"))?,
        };

        major
            .checked_mul(100)
            .and_then(|m| m.checked_add(minor))
            .map(Money)
            .ok_or_else(too_large)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax, rounding half up to the nearest minor unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    /// use stockbook_core::TAX_RATE;
    ///
    /// // ₹20.00 at 5% = ₹1.00
    /// assert_eq!(Money::from_cents(2000).calculate_tax(TAX_RATE).cents(), 100);
    /// // ₹0.10 at 5% = ₹0.005 → ₹0.01
    /// assert_eq!(Money::from_cents(10).calculate_tax(TAX_RATE).cents(), 1);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large line totals from overflowing the intermediate product
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity, or `None` if the result does not fit.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_mul(3).map(|m| m.cents()), Some(897));
    /// assert_eq!(unit_price.checked_mul(i64::MAX), None);
    /// ```
    #[inline]
    pub fn checked_mul(&self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// `self` plus its tax at `rate`, or `None` if the total does not fit.
    pub fn checked_add_tax(&self, rate: TaxRate) -> Option<Money> {
        self.checked_add(self.calculate_tax(rate))
    }

    /// Formats the amount without a currency symbol, e.g. `"12.34"`.
    ///
    /// This is the representation used in exported tables.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money with the fixed currency symbol, e.g. `₹12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.major().abs(),
            self.minor()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
