//! # Domain Types
//!
//! Persisted entity types used throughout Stockbook.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐   ┌─────────────────┐     │
//! │  │    Product      │   │ TransactionRecord │   │    BillLine     │     │
//! │  │  ─────────────  │   │  ───────────────  │   │  ─────────────  │     │
//! │  │  product_id     │◄──│  product_id       │   │  bill_id        │     │
//! │  │  name           │   │  date, time       │   │  product (name) │     │
//! │  │  quantity       │   │  quantity_sold    │   │  price snapshot │     │
//! │  │  price_cents    │   └───────────────────┘   │  subtotal/tax   │     │
//! │  │  min_stock      │                           │  customer       │     │
//! │  └─────────────────┘                           └─────────────────┘     │
//! │                                                                         │
//! │  Products are mutable (stock changes). Transaction records and bill    │
//! │  lines are append-only and never reference a product by pointer:       │
//! │  bill lines carry name and price snapshots.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned id (max existing + 1).
    pub product_id: i64,

    pub name: String,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Unit price in minor units.
    pub price_cents: i64,

    /// Reorder threshold.
    pub min_stock: i64,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// True when stock on hand is below the reorder threshold.
    #[inline]
    pub fn is_under_stocked(&self) -> bool {
        self.quantity < self.min_stock
    }

    /// Units needed to get back to the reorder threshold (0 when healthy).
    pub fn shortfall(&self) -> i64 {
        self.min_stock.saturating_sub(self.quantity).max(0)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.quantity
    }

    /// Case-insensitive substring match on the product name.
    /// An empty filter matches everything.
    pub fn name_matches(&self, filter: &str) -> bool {
        let filter = filter.trim();
        filter.is_empty() || contains_ignore_case(&self.name, filter)
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// Units of one product sold at one moment. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub product_id: i64,
    pub quantity_sold: i64,
}

impl TransactionRecord {
    /// Builds a record stamped with the given moment.
    pub fn at(moment: NaiveDateTime, product_id: i64, quantity_sold: i64) -> Self {
        TransactionRecord {
            date: moment.date(),
            time: moment.time(),
            product_id,
            quantity_sold,
        }
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

// =============================================================================
// Bill Id
// =============================================================================

/// Short opaque bill token: 8 upper-case hex characters, e.g. `3F9A01BC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(String);

impl BillId {
    /// Length of a generated bill id.
    pub const LEN: usize = 8;

    /// Generates a fresh id from a random UUID.
    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        BillId(raw[..Self::LEN].to_uppercase())
    }

    /// Wraps an existing id (e.g. one read back from storage).
    pub fn new(id: impl Into<String>) -> Self {
        BillId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Bill Line
// =============================================================================

/// One persisted line of a bill.
///
/// Uses the snapshot pattern: product name and unit price are frozen at the
/// time of sale so history stays readable after renames or price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BillLine {
    pub bill_id: String,
    pub date: NaiveDateTime,
    /// Product name at time of sale (frozen).
    pub product: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub price_cents: i64,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub customer: String,
}

impl BillLine {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Case-insensitive substring search over bill id, customer and product.
    ///
    /// Matches when ANY of the three fields contains the query; an empty
    /// query matches every line.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || contains_ignore_case(&self.bill_id, query)
            || contains_ignore_case(&self.customer, query)
            || contains_ignore_case(&self.product, query)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> Product {
        Product {
            product_id: 1,
            name: "Pen".to_string(),
            quantity: 10,
            price_cents: 500,
            min_stock: 3,
        }
    }

    fn line(bill_id: &str, product: &str, customer: &str) -> BillLine {
        BillLine {
            bill_id: bill_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            product: product.to_string(),
            quantity: 1,
            price_cents: 500,
            subtotal_cents: 500,
            tax_cents: 25,
            total_cents: 525,
            customer: customer.to_string(),
        }
    }

    #[test]
    fn test_tax_rate_percentage() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_stock_predicates() {
        let mut product = pen();
        assert!(!product.is_under_stocked());
        assert_eq!(product.shortfall(), 0);
        assert!(product.can_sell(10));
        assert!(!product.can_sell(11));

        product.quantity = 1;
        assert!(product.is_under_stocked());
        assert_eq!(product.shortfall(), 2);

        // Exactly at threshold is not under-stocked
        product.quantity = 3;
        assert!(!product.is_under_stocked());
    }

    #[test]
    fn test_product_name_filter() {
        let product = pen();
        assert!(product.name_matches(""));
        assert!(product.name_matches("pe"));
        assert!(product.name_matches("PEN"));
        assert!(!product.name_matches("pencil"));
    }

    #[test]
    fn test_bill_id_format() {
        let id = BillId::generate();
        assert_eq!(id.as_str().len(), BillId::LEN);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_ne!(BillId::generate(), BillId::generate());
    }

    #[test]
    fn test_bill_line_search_is_or_combined_and_case_insensitive() {
        let line = line("AB12CD34", "Blue Pen", "Alice");

        assert!(line.matches_query("ab12"));
        assert!(line.matches_query("ALICE"));
        assert!(line.matches_query("blue"));
        assert!(line.matches_query(""));
        assert!(!line.matches_query("bob"));
    }

    #[test]
    fn test_transaction_record_weekday() {
        // 2024-03-04 was a Monday
        let moment = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        let record = TransactionRecord::at(moment, 1, 2);
        assert_eq!(record.weekday(), Weekday::Mon);
        assert_eq!(record.time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }
}
