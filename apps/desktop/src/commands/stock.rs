//! # Stock Commands
//!
//! Low-stock report and supplier purchase orders.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::render;
use crate::state::{ConfigState, DbState};
use stockbook_core::{find_under_stocked, purchase_order, PurchaseOrder, StockHealth};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub min_stock: i64,
    /// Units needed to reach `min_stock`.
    pub needed: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub health: StockHealth,
    pub items: Vec<LowStockItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDocument {
    pub order: PurchaseOrder,
    pub text: String,
}

/// Every product below its minimum, in inventory order.
pub async fn low_stock_report(db: &DbState) -> Result<LowStockReport, ApiError> {
    debug!("low_stock_report command");

    let inventory = db.inner().inventory().load().await;
    let items = find_under_stocked(&inventory)
        .into_iter()
        .map(|p| LowStockItem {
            needed: p.shortfall(),
            product_id: p.product_id,
            name: p.name,
            quantity: p.quantity,
            min_stock: p.min_stock,
        })
        .collect();

    Ok(LowStockReport {
        health: StockHealth::of(&inventory),
        items,
    })
}

/// Orders the shortfall of every under-stocked product from `supplier`,
/// dated today.
///
/// ## Errors
/// - `VALIDATION_ERROR` if the supplier name is blank
pub async fn create_purchase_order(
    db: &DbState,
    config: &ConfigState,
    supplier: String,
) -> Result<PurchaseOrderDocument, ApiError> {
    debug!(supplier = %supplier, "create_purchase_order command");

    let inventory = db.inner().inventory().load().await;
    let today = Local::now().date_naive();
    let order = purchase_order::compose(&inventory, &supplier, today)?;

    info!(
        supplier = %order.supplier,
        lines = order.lines.len(),
        total = %order.total,
        "Purchase order created"
    );

    let text = render::purchase_order_text(config, &order);
    Ok(PurchaseOrderDocument { order, text })
}
