//! # Cart
//!
//! The in-progress bill: an ordered list of line items plus a customer name.
//! Nothing here is persisted; `checkout` turns the cart into the records the
//! storage layer commits.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────┐  add_line_item   ┌──────────┐  checkout + commit  ┌───────┐ │
//! │   │ Empty │ ───────────────► │ Building │ ──────────────────► │ Empty │ │
//! │   └───────┘                  └──────────┘                     └───────┘ │
//! │       ▲                           │                                     │
//! │       └────────── clear ──────────┘                                     │
//! │                                                                         │
//! │  A failed commit leaves the cart in Building, untouched.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Checks
//! `add_line_item` checks the requested quantity against the product's
//! current stock only. It does not reserve stock across lines, so two lines
//! for the same product can together exceed what is on hand; the commit
//! re-validates and rejects the whole bill in that case.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{BillId, BillLine, Product, TransactionRecord};
use crate::validation::validate_positive_quantity;
use crate::{DEFAULT_CUSTOMER, TAX_RATE};

// =============================================================================
// Line Item
// =============================================================================

/// One line of the cart. Name and price are frozen when the line is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

impl LineItem {
    /// Creates a line from a product snapshot.
    ///
    /// ## Errors
    /// - `InvalidFormat` if the line amount, tax included, does not fit in
    ///   minor units
    pub fn from_product(product: &Product, quantity: i64) -> Result<Self, ValidationError> {
        let subtotal = product
            .price()
            .checked_mul(quantity)
            .filter(|amount| amount.checked_add_tax(TAX_RATE).is_some())
            .ok_or_else(|| ValidationError::amount_too_large("quantity"))?;

        Ok(LineItem {
            product_id: product.product_id,
            name: product.name.clone(),
            quantity,
            unit_price_cents: product.price_cents,
            subtotal_cents: subtotal.cents(),
        })
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Tax for this line alone, rounded to the minor unit.
    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(TAX_RATE)
    }

    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Running totals of a cart. Always recomputed from the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl CartTotals {
    fn from_subtotal(subtotal: Money) -> Self {
        let tax = subtotal.calculate_tax(TAX_RATE);
        CartTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        cart.totals()
    }
}

/// Observable state of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    Empty,
    Building,
}

// =============================================================================
// Receipt / Checkout
// =============================================================================

/// Value handed to a renderer after a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub bill_id: BillId,
    pub timestamp: NaiveDateTime,
    pub customer: String,
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Everything a bill commit writes, derived from the cart in one pure step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub receipt: Receipt,
    /// One persisted line per cart line, all sharing one bill id.
    pub bill_lines: Vec<BillLine>,
    /// One sales-log record per cart line.
    pub transactions: Vec<TransactionRecord>,
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    customer: Option<String>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Appends a line for `quantity` units of `product`.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not positive
    /// - `InsufficientStock` if `quantity` exceeds `product.quantity`
    /// - `Validation` if the bill amount would no longer fit in minor units
    ///
    /// On error the cart is unchanged.
    ///
    /// ## Returns
    /// The updated running subtotal.
    pub fn add_line_item(&mut self, product: &Product, quantity: i64) -> CoreResult<Money> {
        validate_positive_quantity("quantity", quantity)?;

        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                product_id: product.product_id,
                name: product.name.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        let line = LineItem::from_product(product, quantity)?;
        let subtotal = self
            .subtotal()
            .checked_add(line.subtotal())
            .filter(|amount| amount.checked_add_tax(TAX_RATE).is_some())
            .ok_or_else(|| ValidationError::amount_too_large("quantity"))?;

        self.items.push(line);
        Ok(subtotal)
    }

    /// Sets the customer name used when the bill is generated.
    pub fn set_customer(&mut self, customer: impl Into<String>) {
        self.customer = Some(customer.into());
    }

    pub fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    /// Discards all lines and the customer name.
    pub fn clear(&mut self) {
        self.items.clear();
        self.customer = None;
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status(&self) -> CartStatus {
        if self.is_empty() {
            CartStatus::Empty
        } else {
            CartStatus::Building
        }
    }

    /// Total units of one product across all lines.
    pub fn quantity_of(&self, product_id: i64) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// `subtotal`, 5% `tax` and `total = subtotal + tax`.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_subtotal(self.subtotal())
    }

    /// Derives the bill lines, sales-log records and receipt for this cart.
    ///
    /// `customer` overrides the name stored on the cart; a blank name falls
    /// back to [`DEFAULT_CUSTOMER`]. Each bill line carries its own rounded
    /// tax and total; the receipt carries the cart-level totals.
    ///
    /// ## Errors
    /// - `EmptyCart` if there are no lines
    pub fn checkout(
        &self,
        bill_id: &BillId,
        moment: NaiveDateTime,
        customer: Option<&str>,
    ) -> CoreResult<Checkout> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let customer = resolve_customer(customer.or(self.customer()));

        let bill_lines = self
            .items
            .iter()
            .map(|item| BillLine::from_line_item(bill_id, moment, &customer, item))
            .collect();

        let transactions = self
            .items
            .iter()
            .map(|item| TransactionRecord::at(moment, item.product_id, item.quantity))
            .collect();

        let totals = self.totals();
        let receipt = Receipt {
            bill_id: bill_id.clone(),
            timestamp: moment,
            customer,
            items: self.items.clone(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
        };

        Ok(Checkout {
            receipt,
            bill_lines,
            transactions,
        })
    }
}

impl BillLine {
    /// The persisted form of one cart line, with its own rounded tax.
    pub fn from_line_item(
        bill_id: &BillId,
        date: NaiveDateTime,
        customer: &str,
        item: &LineItem,
    ) -> Self {
        BillLine {
            bill_id: bill_id.as_str().to_string(),
            date,
            product: item.name.clone(),
            quantity: item.quantity,
            price_cents: item.unit_price_cents,
            subtotal_cents: item.subtotal_cents,
            tax_cents: item.tax().cents(),
            total_cents: item.total().cents(),
            customer: customer.to_string(),
        }
    }
}

/// Trims a customer name, substituting [`DEFAULT_CUSTOMER`] when blank.
pub fn resolve_customer(customer: Option<&str>) -> String {
    match customer.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_CUSTOMER.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
