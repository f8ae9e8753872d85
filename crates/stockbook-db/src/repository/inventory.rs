//! # Inventory Repository
//!
//! The product table: load/save of the whole collection, lookups, product
//! creation and stock adjustment.
//!
//! ## Stock Adjustment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Conditional Delta Update                             │
//! │                                                                         │
//! │   read row          missing          → ProductNotFound                 │
//! │                     quantity + delta past i64 → Validation             │
//! │                                                                         │
//! │   UPDATE inventory SET quantity = quantity + :delta                     │
//! │    WHERE product_id = :id AND quantity + :delta >= 0                    │
//! │                                                                         │
//! │   rows_affected = 1  → applied                                          │
//! │   rows_affected = 0  → InsufficientStock (nothing changed)              │
//! │                                                                         │
//! │   The check and the write are one statement, so a concurrent commit    │
//! │   can never observe a stale quantity and push stock below zero.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use stockbook_core::validation::{
    validate_new_product, validate_non_negative, validate_positive_quantity,
};
use stockbook_core::{CoreError, Money, Product, ValidationError};

const SELECT_PRODUCT: &str =
    "SELECT product_id, name, quantity, price_cents, min_stock FROM inventory";

/// Repository for the inventory table.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// All products in store order.
    ///
    /// Never fails: an unreadable table yields an empty inventory so a fresh
    /// install starts cleanly.
    pub async fn load(&self) -> Vec<Product> {
        match self.try_load().await {
            Ok(products) => products,
            Err(err) => {
                warn!(error = %err, "Inventory unreadable, starting empty");
                Vec::new()
            }
        }
    }

    async fn try_load(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Loaded inventory");
        Ok(products)
    }

    /// Replaces the whole inventory with `products`, atomically.
    ///
    /// ## Errors
    /// - `Domain(Validation)` if any product has a negative field
    /// - `UniqueViolation` if two products share an id
    ///
    /// On error the previous contents are kept.
    pub async fn save(&self, products: &[Product]) -> DbResult<()> {
        for product in products {
            validate_non_negative("quantity", product.quantity)?;
            validate_non_negative("price", product.price_cents)?;
            validate_non_negative("min_stock", product.min_stock)?;
        }

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        sqlx::query("DELETE FROM inventory").execute(&mut *tx).await?;
        for product in products {
            insert(&mut tx, product).await?;
        }

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(count = products.len(), "Saved inventory");
        Ok(())
    }

    pub async fn find_by_id(&self, product_id: i64) -> DbResult<Option<Product>> {
        fetch_product(&self.pool, product_id).await
    }

    /// Products whose name contains `filter`, ignoring case.
    pub async fn search(&self, filter: &str) -> Vec<Product> {
        let products: Vec<Product> = self
            .load()
            .await
            .into_iter()
            .filter(|p| p.name_matches(filter))
            .collect();

        debug!(filter = %filter, count = products.len(), "Searched inventory");
        products
    }

    /// Creates a product with the next free id (`max + 1`, or `1` when empty).
    ///
    /// ## Errors
    /// - `Domain(Validation)` for a blank name or a negative quantity,
    ///   price or threshold
    pub async fn add_product(
        &self,
        name: &str,
        quantity: i64,
        price: Money,
        min_stock: i64,
    ) -> DbResult<Product> {
        validate_new_product(name, quantity, price, min_stock)?;

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let product_id: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(product_id), 0) + 1 FROM inventory")
                .fetch_one(&mut *tx)
                .await?;

        let product = Product {
            product_id,
            name: name.trim().to_string(),
            quantity,
            price_cents: price.cents(),
            min_stock,
        };
        insert(&mut tx, &product).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(product_id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Adds `delta` (possibly negative) to a product's stock.
    ///
    /// ## Errors
    /// - `Domain(ProductNotFound)` if the id is unknown
    /// - `Domain(InsufficientStock)` if stock would go negative
    /// - `Domain(Validation)` if the new stock level does not fit in an `i64`
    ///
    /// On error the stored quantity is unchanged.
    ///
    /// ## Returns
    /// The product after the change.
    pub async fn adjust_quantity(&self, product_id: i64, delta: i64) -> DbResult<Product> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;
        let product = apply_adjustment(&mut tx, product_id, delta).await?;
        tx.commit().await.map_err(DbError::transaction)?;
        Ok(product)
    }

    /// Receives `quantity` new units of a product.
    pub async fn add_stock(&self, product_id: i64, quantity: i64) -> DbResult<Product> {
        validate_positive_quantity("quantity", quantity)?;
        let product = self.adjust_quantity(product_id, quantity).await?;

        info!(product_id, added = quantity, on_hand = product.quantity, "Stock received");
        Ok(product)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Connection-level helpers (shared with the billing commit)
// =============================================================================

pub(crate) async fn fetch_product<'e, E>(executor: E, product_id: i64) -> DbResult<Option<Product>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE product_id = ?1"))
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

async fn insert(conn: &mut SqliteConnection, product: &Product) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO inventory (product_id, name, quantity, price_cents, min_stock) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(product.product_id)
    .bind(&product.name)
    .bind(product.quantity)
    .bind(product.price_cents)
    .bind(product.min_stock)
    .execute(conn)
    .await?;
    Ok(())
}

/// Conditional stock update on an open connection or transaction.
pub(crate) async fn apply_adjustment(
    conn: &mut SqliteConnection,
    product_id: i64,
    delta: i64,
) -> DbResult<Product> {
    debug!(product_id, delta, "Adjusting stock");

    let current = fetch_product(&mut *conn, product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(product_id))?;

    if current.quantity.checked_add(delta).is_none() {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "stock level is too large".to_string(),
        }
        .into());
    }

    let updated = sqlx::query(
        "UPDATE inventory SET quantity = quantity + ?1 \
         WHERE product_id = ?2 AND quantity + ?1 >= 0",
    )
    .bind(delta)
    .bind(product_id)
    .execute(&mut *conn)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(CoreError::InsufficientStock {
            product_id,
            name: current.name,
            available: current.quantity,
            requested: delta.saturating_neg(),
        }
        .into());
    }

    let product = fetch_product(&mut *conn, product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(product_id))?;
    Ok(product)
}

// =============================================================================
// Unit Tests
// =============================================================================
