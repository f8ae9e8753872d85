//! # Billing Engine
//!
//! Holds the cart of the bill being rung up and commits it against the
//! stores.
//!
//! ## Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       commit(customer)                                  │
//! │                                                                         │
//! │   cart.checkout(bill_id, now, customer)   ← EmptyCart if no lines       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   BEGIN                                                                 │
//! │   ├── per line: conditional stock decrement  ← InsufficientStock?       │
//! │   ├── per line: INSERT INTO bills                                       │
//! │   ├── per line: INSERT INTO transactions                                │
//! │   COMMIT                                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   cart.clear(), return Receipt                                          │
//! │                                                                         │
//! │   Any error drops the SQL transaction (rollback) and leaves the cart    │
//! │   exactly as it was, so the cashier can fix the bill and retry.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines for the same product are decremented one after another inside the
//! transaction, so two lines that together exceed stock fail the whole bill.

use chrono::{Local, NaiveDateTime, SubsecRound};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::bill::insert_line;
use crate::repository::inventory::apply_adjustment;
use crate::repository::transaction::insert_record;
use stockbook_core::{BillId, Cart, CartTotals, CoreError, Money, Receipt};

/// The bill being rung up plus the stores it commits into.
#[derive(Debug)]
pub struct BillingEngine {
    db: Database,
    cart: Cart,
}

impl BillingEngine {
    pub fn new(db: Database) -> Self {
        BillingEngine {
            db,
            cart: Cart::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn set_customer(&mut self, customer: impl Into<String>) {
        self.cart.set_customer(customer);
    }

    /// Adds a line for `quantity` units of a product, checked against the
    /// product's stock right now.
    ///
    /// ## Errors
    /// - `Domain(ProductNotFound)` if the id is unknown
    /// - `Domain(InsufficientStock)` if `quantity` exceeds stock on hand
    /// - `Domain(Validation)` if `quantity` is not positive
    ///
    /// ## Returns
    /// The running subtotal.
    pub async fn add_line_item(&mut self, product_id: i64, quantity: i64) -> DbResult<Money> {
        let product = self
            .db
            .inventory()
            .find_by_id(product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(product_id))?;

        let subtotal = self.cart.add_line_item(&product, quantity)?;

        debug!(
            product_id,
            quantity,
            subtotal = %subtotal,
            lines = self.cart.len(),
            "Line added to cart"
        );
        Ok(subtotal)
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Discards the cart. Nothing is persisted.
    pub fn clear(&mut self) {
        debug!(lines = self.cart.len(), "Cart cleared");
        self.cart.clear();
    }

    /// Commits the cart stamped with the local time, to the second.
    pub async fn commit(&mut self, customer: Option<&str>) -> DbResult<Receipt> {
        let now = Local::now().naive_local().trunc_subsecs(0);
        self.commit_at(customer, now).await
    }

    /// Commits the cart as a bill at `moment`.
    ///
    /// ## Errors
    /// - `Domain(EmptyCart)` if the cart has no lines
    /// - `Domain(InsufficientStock)` if stock changed since the lines were added
    /// - `Domain(ProductNotFound)` if a product vanished from the inventory
    /// - persistence errors from SQLite
    ///
    /// Nothing is written and the cart is kept on any error.
    pub async fn commit_at(
        &mut self,
        customer: Option<&str>,
        moment: NaiveDateTime,
    ) -> DbResult<Receipt> {
        let bill_id = BillId::generate();
        let checkout = self.cart.checkout(&bill_id, moment, customer)?;

        let mut tx = self.db.pool().begin().await.map_err(DbError::transaction)?;

        for item in &checkout.receipt.items {
            apply_adjustment(&mut tx, item.product_id, -item.quantity).await?;
        }
        for line in &checkout.bill_lines {
            insert_line(&mut tx, line).await?;
        }
        for record in &checkout.transactions {
            insert_record(&mut tx, record).await?;
        }

        tx.commit().await.map_err(DbError::transaction)?;

        let receipt = checkout.receipt;
        info!(
            bill_id = %receipt.bill_id,
            customer = %receipt.customer,
            lines = receipt.items.len(),
            total = %receipt.total,
            "Bill committed"
        );

        self.cart.clear();
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use chrono::NaiveDate;
    use stockbook_core::{CartStatus, DEFAULT_CUSTOMER};

    async fn db_with_stock() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let inventory = db.inventory();
        inventory
            .add_product("Pen", 10, Money::from_cents(500), 3)
            .await
            .unwrap();
        inventory
            .add_product("Pad", 5, Money::from_cents(250), 2)
            .await
            .unwrap();
        db
    }

    fn moment() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_sale_decrements_stock_and_appends_records() {
        let db = db_with_stock().await;
        let mut engine = db.billing();

        let subtotal = engine.add_line_item(1, 4).await.unwrap();
        assert_eq!(subtotal.cents(), 2000);

        let receipt = engine.commit_at(Some("Alice"), moment()).await.unwrap();

        assert_eq!(receipt.customer, "Alice");
        assert_eq!(receipt.subtotal.cents(), 2000);
        assert_eq!(receipt.tax.cents(), 100);
        assert_eq!(receipt.total.cents(), 2100);
        assert_eq!(receipt.bill_id.as_str().len(), BillId::LEN);

        let pen = db.inventory().find_by_id(1).await.unwrap().unwrap();
        assert_eq!(pen.quantity, 6);

        let lines = db.bills().load().await;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].bill_id, receipt.bill_id.as_str());
        assert_eq!(lines[0].product, "Pen");
        assert_eq!(lines[0].total_cents, 2100);
        assert_eq!(lines[0].date, moment());

        let log = db.transactions().load().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].product_id, 1);
        assert_eq!(log[0].quantity_sold, 4);
        assert_eq!(log[0].date, moment().date());

        assert_eq!(engine.cart().status(), CartStatus::Empty);
    }

    #[tokio::test]
    async fn test_add_more_than_stock_is_rejected() {
        let db = db_with_stock().await;
        let mut engine = db.billing();

        let err = engine.add_line_item(1, 99).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { available: 10, requested: 99, .. })
        ));
        assert!(engine.cart().is_empty());
        assert_eq!(db.inventory().find_by_id(1).await.unwrap().unwrap().quantity, 10);

        let err = engine.add_line_item(42, 1).await.unwrap_err();
        assert_eq!(err.as_domain(), Some(&CoreError::ProductNotFound(42)));
    }

    #[tokio::test]
    async fn test_empty_commit_writes_nothing() {
        let db = db_with_stock().await;
        let mut engine = db.billing();

        let err = engine.commit_at(Some("Alice"), moment()).await.unwrap_err();
        assert_eq!(err.as_domain(), Some(&CoreError::EmptyCart));

        assert!(db.bills().load().await.is_empty());
        assert!(db.transactions().load().await.is_empty());
        assert_eq!(db.inventory().find_by_id(1).await.unwrap().unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_lines_exceeding_stock_together_fail_whole_bill() {
        let db = db_with_stock().await;
        let mut engine = db.billing();

        engine.add_line_item(2, 1).await.unwrap();
        engine.add_line_item(1, 6).await.unwrap();
        engine.add_line_item(1, 6).await.unwrap();
        let before = engine.cart().clone();

        let err = engine.commit_at(None, moment()).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { product_id: 1, available: 4, requested: 6, .. })
        ));

        // Rolled back: the Pad decrement and first Pen decrement are undone
        assert_eq!(db.inventory().find_by_id(1).await.unwrap().unwrap().quantity, 10);
        assert_eq!(db.inventory().find_by_id(2).await.unwrap().unwrap().quantity, 5);
        assert!(db.bills().load().await.is_empty());
        assert!(db.transactions().load().await.is_empty());
        assert_eq!(engine.cart(), &before);
    }

    #[tokio::test]
    async fn test_stock_sold_elsewhere_is_rechecked_at_commit() {
        let db = db_with_stock().await;
        let mut first = db.billing();
        let mut second = db.billing();

        first.add_line_item(2, 4).await.unwrap();
        second.add_line_item(2, 3).await.unwrap();

        first.commit_at(None, moment()).await.unwrap();
        let err = second.commit_at(None, moment()).await.unwrap_err();

        assert!(matches!(err, DbError::Domain(CoreError::InsufficientStock { .. })));
        assert_eq!(db.inventory().find_by_id(2).await.unwrap().unwrap().quantity, 1);
        assert_eq!(second.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_multi_line_bill_shares_one_id() {
        let db = db_with_stock().await;
        let mut engine = db.billing();
        engine.set_customer("Bob");

        engine.add_line_item(1, 1).await.unwrap();
        engine.add_line_item(2, 2).await.unwrap();
        let totals = engine.totals();
        assert_eq!(totals.subtotal.cents(), 1000);
        assert_eq!(totals.total.cents(), 1050);

        let receipt = engine.commit(None).await.unwrap();
        assert_eq!(receipt.customer, "Bob");

        let lines = db.bills().lines_for_bill(receipt.bill_id.as_str()).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.customer == "Bob"));
        assert!(lines.iter().all(|l| l.date == receipt.timestamp));
        assert_eq!(db.transactions().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_clear_discards_without_persisting() {
        let db = db_with_stock().await;
        let mut engine = db.billing();

        engine.add_line_item(1, 2).await.unwrap();
        engine.clear();

        assert!(engine.cart().is_empty());
        assert_eq!(engine.totals().total, Money::zero());
        assert_eq!(db.inventory().find_by_id(1).await.unwrap().unwrap().quantity, 10);

        engine.add_line_item(1, 1).await.unwrap();
        let receipt = engine.commit_at(Some(""), moment()).await.unwrap();
        assert_eq!(receipt.customer, DEFAULT_CUSTOMER);
    }
}
