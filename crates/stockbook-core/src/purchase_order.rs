//! # Purchase Order Composer
//!
//! Turns a set of under-stocked products into a structured supplier order.
//! Rendering the order as a document is left to the caller.
//!
//! ```text
//! find_under_stocked(inventory)
//!        │
//!        ▼
//! compose(low, "Acme Supplies", today)
//!        │   needed    = min_stock - quantity
//!        │   line_cost = needed × price
//!        │   deliver_by = today + 7 days
//!        ▼
//! PurchaseOrder { lines, total }
//! ```

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_supplier_name;

/// Days between ordering and the requested delivery date.
pub const DELIVERY_LEAD_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    pub product_id: i64,
    pub name: String,
    pub quantity_needed: i64,
    pub unit_price: Money,
    pub line_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub supplier: String,
    pub order_date: NaiveDate,
    pub deliver_by: NaiveDate,
    pub lines: Vec<PurchaseOrderLine>,
    pub total: Money,
}

/// Composes a purchase order for `under_stocked` products.
///
/// Products that are not actually short (`quantity >= min_stock`) are
/// skipped, so every line orders a positive quantity.
///
/// ## Errors
/// - `Validation` if `supplier` is blank
/// - `Validation` if a line cost or the total does not fit in minor units
pub fn compose(
    under_stocked: &[Product],
    supplier: &str,
    order_date: NaiveDate,
) -> CoreResult<PurchaseOrder> {
    validate_supplier_name(supplier)?;

    let lines = under_stocked
        .iter()
        .filter(|p| p.is_under_stocked())
        .map(|p| -> CoreResult<PurchaseOrderLine> {
            let quantity_needed = p.shortfall();
            let line_cost = p
                .price()
                .checked_mul(quantity_needed)
                .ok_or_else(|| ValidationError::amount_too_large("line_cost"))?;

            Ok(PurchaseOrderLine {
                product_id: p.product_id,
                name: p.name.clone(),
                quantity_needed,
                unit_price: p.price(),
                line_cost,
            })
        })
        .collect::<CoreResult<Vec<PurchaseOrderLine>>>()?;

    let total = lines
        .iter()
        .try_fold(Money::zero(), |acc, l| acc.checked_add(l.line_cost))
        .ok_or_else(|| ValidationError::amount_too_large("total"))?;

    Ok(PurchaseOrder {
        supplier: supplier.trim().to_string(),
        order_date,
        deliver_by: order_date + Duration::days(DELIVERY_LEAD_DAYS),
        lines,
        total,
    })
}
