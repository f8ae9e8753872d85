//! # Product Commands
//!
//! Inventory table, product creation and stock receipt.
//!
//! ## Form Input
//! Creation and stock forms send raw text. Parsing happens here so the UI
//! gets a `VALIDATION_ERROR` naming the offending field:
//!
//! ```text
//! { name: "Notebook", quantity: "20", price: "2.50", minStock: "5" }
//!        │
//!        ▼
//! parse_integer / Money::parse_decimal ──► InventoryRepository::add_product
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use stockbook_core::validation::parse_integer;
use stockbook_core::{Money, Product};

/// Product as shown in the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub price_display: String,
    pub min_stock: i64,
    /// Row is highlighted when true.
    pub under_stocked: bool,
}

impl ProductDto {
    pub fn from_product(product: Product, config: &ConfigState) -> Self {
        ProductDto {
            price_display: config.format_currency(product.price_cents),
            under_stocked: product.is_under_stocked(),
            product_id: product.product_id,
            name: product.name,
            quantity: product.quantity,
            price_cents: product.price_cents,
            min_stock: product.min_stock,
        }
    }
}

/// "New product" form contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductForm {
    pub name: String,
    pub quantity: String,
    pub price: String,
    pub min_stock: String,
}

/// Lists products, optionally filtered by a name substring.
pub async fn list_products(
    db: &DbState,
    config: &ConfigState,
    filter: Option<String>,
) -> Result<Vec<ProductDto>, ApiError> {
    let filter = filter.unwrap_or_default();
    debug!(filter = %filter, "list_products command");

    let products = db.inner().inventory().search(&filter).await;
    Ok(products
        .into_iter()
        .map(|p| ProductDto::from_product(p, config))
        .collect())
}

pub async fn get_product(
    db: &DbState,
    config: &ConfigState,
    product_id: i64,
) -> Result<ProductDto, ApiError> {
    debug!(product_id, "get_product command");

    let product = db
        .inner()
        .inventory()
        .find_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    Ok(ProductDto::from_product(product, config))
}

/// Creates a product from the form; the store assigns its id.
pub async fn add_product(
    db: &DbState,
    config: &ConfigState,
    form: NewProductForm,
) -> Result<ProductDto, ApiError> {
    debug!(name = %form.name, "add_product command");

    let quantity = parse_integer("quantity", &form.quantity)?;
    let price = Money::parse_decimal("price", &form.price)?;
    let min_stock = parse_integer("min_stock", &form.min_stock)?;

    let product = db
        .inner()
        .inventory()
        .add_product(&form.name, quantity, price, min_stock)
        .await?;

    Ok(ProductDto::from_product(product, config))
}

/// Receives new units of an existing product.
pub async fn add_stock(
    db: &DbState,
    config: &ConfigState,
    product_id: i64,
    quantity: String,
) -> Result<ProductDto, ApiError> {
    debug!(product_id, quantity = %quantity, "add_stock command");

    let quantity = parse_integer("quantity", &quantity)?;
    let product = db.inner().inventory().add_stock(product_id, quantity).await?;

    Ok(ProductDto::from_product(product, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockbook_db::{Database, DbConfig};

    async fn db() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn form(name: &str, quantity: &str, price: &str, min_stock: &str) -> NewProductForm {
        NewProductForm {
            name: name.to_string(),
            quantity: quantity.to_string(),
            price: price.to_string(),
            min_stock: min_stock.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_products() {
        let db = db().await;
        let config = ConfigState::default();

        let notebook = add_product(&db, &config, form("Notebook", "20", "2.50", "5"))
            .await
            .unwrap();
        assert_eq!(notebook.product_id, 1);
        assert_eq!(notebook.price_cents, 250);
        assert_eq!(notebook.price_display, "₹2.50");
        assert!(!notebook.under_stocked);

        add_product(&db, &config, form("Blue Pen", "1", "10", "3"))
            .await
            .unwrap();

        let all = list_products(&db, &config, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[1].under_stocked);

        let pens = list_products(&db, &config, Some("pen".to_string())).await.unwrap();
        assert_eq!(pens.len(), 1);
        assert_eq!(pens[0].name, "Blue Pen");
    }

    #[tokio::test]
    async fn test_bad_form_input_is_a_validation_error() {
        let db = db().await;
        let config = ConfigState::default();

        for bad in [
            form("Notebook", "twenty", "2.50", "5"),
            form("Notebook", "20", "2.5.0", "5"),
            form("Notebook", "-1", "2.50", "5"),
            form("", "20", "2.50", "5"),
        ] {
            let err = add_product(&db, &config, bad).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
        assert!(list_products(&db, &config, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_stock() {
        let db = db().await;
        let config = ConfigState::default();
        add_product(&db, &config, form("Pen", "2", "5.00", "3"))
            .await
            .unwrap();

        let pen = add_stock(&db, &config, 1, "8".to_string()).await.unwrap();
        assert_eq!(pen.quantity, 10);

        let err = add_stock(&db, &config, 1, "0".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_stock(&db, &config, 9, "1".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = get_product(&db, &config, 9).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
