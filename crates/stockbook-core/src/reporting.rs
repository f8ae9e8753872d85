//! # Reporting
//!
//! Sales aggregations over the transaction log. Charts are drawn elsewhere;
//! these functions only produce the numbers.
//!
//! ## Available Reports
//! ```text
//! ┌──────────────────────┬───────────────────────────────────────────────┐
//! │ sales_by_day_of_week │ Mon..Sun → units sold (all 7 days, zero-fill) │
//! │ top_products         │ [(name, units)] descending, truncated to n    │
//! │ sales_heatmap        │ weekday × product → units (zero-fill)         │
//! └──────────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! Product names are resolved through the current inventory. A product that
//! no longer exists is labelled `Product #<id>` rather than dropped.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::types::{Product, TransactionRecord};

/// Weekdays in canonical report order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdaySales {
    pub weekday: Weekday,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub weekday: Weekday,
    /// One cell per entry of [`SalesHeatmap::products`].
    pub quantities: Vec<i64>,
}

/// Units sold per weekday per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesHeatmap {
    /// Column labels, ordered by product id.
    pub products: Vec<String>,
    /// Seven rows, Monday first.
    pub rows: Vec<HeatmapRow>,
}

impl SalesHeatmap {
    /// Looks up one cell by weekday and product name.
    pub fn get(&self, weekday: Weekday, product: &str) -> Option<i64> {
        let column = self.products.iter().position(|p| p == product)?;
        self.rows
            .iter()
            .find(|r| r.weekday == weekday)
            .map(|r| r.quantities[column])
    }
}

fn name_index(inventory: &[Product]) -> HashMap<i64, &str> {
    inventory
        .iter()
        .map(|p| (p.product_id, p.name.as_str()))
        .collect()
}

fn product_label(names: &HashMap<i64, &str>, product_id: i64) -> String {
    names
        .get(&product_id)
        .map(|n| n.to_string())
        .unwrap_or_else(|| format!("Product #{}", product_id))
}

/// Units sold per weekday, Monday first, all seven days present.
pub fn sales_by_day_of_week(transactions: &[TransactionRecord]) -> Vec<WeekdaySales> {
    let mut totals = [0_i64; 7];
    for record in transactions {
        totals[record.weekday().num_days_from_monday() as usize] += record.quantity_sold;
    }

    WEEKDAYS
        .iter()
        .zip(totals)
        .map(|(&weekday, quantity)| WeekdaySales { weekday, quantity })
        .collect()
}

/// The `n` best-selling products by units sold.
///
/// Ties keep the order in which products first appear in the log.
pub fn top_products(
    transactions: &[TransactionRecord],
    inventory: &[Product],
    n: usize,
) -> Vec<ProductSales> {
    let names = name_index(inventory);

    let mut order: Vec<i64> = Vec::new();
    let mut totals: HashMap<i64, i64> = HashMap::new();
    for record in transactions {
        let entry = totals.entry(record.product_id).or_insert_with(|| {
            order.push(record.product_id);
            0
        });
        *entry += record.quantity_sold;
    }

    let mut sales: Vec<ProductSales> = order
        .into_iter()
        .map(|product_id| ProductSales {
            product_id,
            name: product_label(&names, product_id),
            quantity: totals[&product_id],
        })
        .collect();

    // sort_by is stable, so first-seen order breaks ties
    sales.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sales.truncate(n);
    sales
}

/// Weekday × product matrix of units sold.
///
/// Columns cover every product that appears in the log, ordered by id.
pub fn sales_heatmap(transactions: &[TransactionRecord], inventory: &[Product]) -> SalesHeatmap {
    let names = name_index(inventory);

    let mut cells: BTreeMap<i64, [i64; 7]> = BTreeMap::new();
    for record in transactions {
        let day = record.weekday().num_days_from_monday() as usize;
        cells.entry(record.product_id).or_insert([0; 7])[day] += record.quantity_sold;
    }

    let products = cells
        .keys()
        .map(|&id| product_label(&names, id))
        .collect();

    let rows = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(day, &weekday)| HeatmapRow {
            weekday,
            quantities: cells.values().map(|week| week[day]).collect(),
        })
        .collect();

    SalesHeatmap { products, rows }
}
