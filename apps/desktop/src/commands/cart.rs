//! # Cart Commands
//!
//! The bill window: lines are added one at a time, then the whole cart is
//! committed as one bill.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_to_cart   ┌──────────┐  commit_bill   ┌──────────────┐
//! │  Empty   │───────────────►│ Building │───────────────►│ Bill written │
//! └──────────┘                └──────────┘                └──────┬───────┘
//!      ▲                           │ clear_cart                  │
//!      └───────────────────────────┴─────────────────────────────┘
//! ```
//!
//! Adding a line checks stock but does not reserve it; `commit_bill`
//! checks again inside the database transaction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::render;
use crate::state::{BillingState, ConfigState};
use stockbook_core::{Cart, CartStatus, CartTotals, LineItem, Receipt};

/// Cart contents with totals, plus display strings for the totals block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub status: CartStatus,
    pub customer: Option<String>,
    pub subtotal_display: String,
    pub tax_display: String,
    pub total_display: String,
}

impl CartResponse {
    fn of(cart: &Cart, config: &ConfigState) -> Self {
        let totals = cart.totals();
        CartResponse {
            items: cart.items().to_vec(),
            status: cart.status(),
            customer: cart.customer().map(str::to_string),
            subtotal_display: config.format_currency(totals.subtotal.cents()),
            tax_display: config.format_currency(totals.tax.cents()),
            total_display: config.format_currency(totals.total.cents()),
            totals,
        }
    }
}

/// A committed bill and its printable text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillReceipt {
    pub receipt: Receipt,
    pub text: String,
}

pub async fn get_cart(
    billing: &BillingState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    let engine = billing.lock().await;
    Ok(CartResponse::of(engine.cart(), config))
}

/// Adds `quantity` units of a product as a new cart line.
///
/// ## Errors
/// - `NOT_FOUND` for an unknown product id
/// - `INSUFFICIENT_STOCK` when `quantity` exceeds stock on hand
/// - `VALIDATION_ERROR` when `quantity` is not positive
pub async fn add_to_cart(
    billing: &BillingState,
    config: &ConfigState,
    product_id: i64,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, quantity, "add_to_cart command");

    let mut engine = billing.lock().await;
    engine.add_line_item(product_id, quantity).await?;
    Ok(CartResponse::of(engine.cart(), config))
}

pub async fn set_customer(
    billing: &BillingState,
    config: &ConfigState,
    customer: String,
) -> Result<CartResponse, ApiError> {
    debug!(customer = %customer, "set_customer command");

    let mut engine = billing.lock().await;
    engine.set_customer(customer);
    Ok(CartResponse::of(engine.cart(), config))
}

pub async fn clear_cart(
    billing: &BillingState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    let mut engine = billing.lock().await;
    engine.clear();
    Ok(CartResponse::of(engine.cart(), config))
}

/// Generates the bill: stock, bill ledger and sales log are written
/// together, then the cart is emptied.
///
/// `customer` overrides the name set with [`set_customer`]; when both are
/// blank the configured default customer is recorded. On any error nothing
/// is written and the cart is kept so the cashier can fix it.
pub async fn commit_bill(
    billing: &BillingState,
    config: &ConfigState,
    customer: Option<String>,
) -> Result<BillReceipt, ApiError> {
    debug!(customer = ?customer, "commit_bill command");

    let mut engine = billing.lock().await;
    let customer = customer
        .as_deref()
        .or(engine.cart().customer())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(config.default_customer.as_str())
        .to_string();

    let receipt = engine.commit(Some(&customer)).await?;
    let text = render::receipt_text(config, &receipt);

    Ok(BillReceipt { receipt, text })
}
