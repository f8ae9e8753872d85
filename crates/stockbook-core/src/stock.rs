//! # Low-Stock Monitor
//!
//! Pure queries over an inventory snapshot that find products below their
//! reorder threshold.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Inventory health, as shown on the low-stock badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum StockHealth {
    Healthy,
    /// Number of under-stocked products.
    Warning(usize),
}

impl StockHealth {
    pub fn of(inventory: &[Product]) -> Self {
        match inventory.iter().filter(|p| p.is_under_stocked()).count() {
            0 => StockHealth::Healthy,
            n => StockHealth::Warning(n),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, StockHealth::Healthy)
    }
}

/// All products where `quantity < min_stock`, in inventory order.
pub fn find_under_stocked(inventory: &[Product]) -> Vec<Product> {
    inventory
        .iter()
        .filter(|p| p.is_under_stocked())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, quantity: i64, min_stock: i64) -> Product {
        Product {
            product_id: id,
            name: format!("Item {}", id),
            quantity,
            price_cents: 100,
            min_stock,
        }
    }

    #[test]
    fn test_find_under_stocked_keeps_store_order() {
        let inventory = vec![
            product(1, 0, 5),
            product(2, 5, 5),
            product(3, 9, 5),
            product(4, 2, 3),
        ];

        let low = find_under_stocked(&inventory);
        let ids: Vec<i64> = low.iter().map(|p| p.product_id).collect();
        assert_eq!(ids, vec![1, 4]);

        // Idempotent and side-effect free
        assert_eq!(find_under_stocked(&inventory), low);
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn test_stock_health() {
        assert_eq!(StockHealth::of(&[]), StockHealth::Healthy);
        assert!(StockHealth::of(&[product(1, 5, 5)]).is_healthy());
        assert_eq!(
            StockHealth::of(&[product(1, 0, 5), product(2, 1, 2)]),
            StockHealth::Warning(2)
        );
    }
}
