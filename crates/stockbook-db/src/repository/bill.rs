//! # Bill Ledger Repository
//!
//! One row per bill line. Lines of the same bill share `bill_id` and `date`
//! and carry frozen product name and price snapshots, so the ledger never
//! joins back to the inventory.
//!
//! ## Search
//! `find_by_query` matches a case-insensitive substring against bill id,
//! customer and product name; a line matches when ANY of them contains it.
//! The match runs in Rust rather than SQL `LIKE`, which only folds ASCII.

use chrono::NaiveDateTime;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use stockbook_core::cart::resolve_customer;
use stockbook_core::{BillId, BillLine, CoreError, LineItem};

const SELECT_LINE: &str = "SELECT bill_id, date, product, quantity, price_cents, \
     subtotal_cents, tax_cents, total_cents, customer FROM bills";

#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Every bill line in append order; empty if the ledger is unreadable.
    pub async fn load(&self) -> Vec<BillLine> {
        let result = sqlx::query_as::<_, BillLine>(&format!("{SELECT_LINE} ORDER BY id"))
            .fetch_all(&self.pool)
            .await;

        match result {
            Ok(lines) => lines,
            Err(err) => {
                warn!(error = %err, "Bill ledger unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Appends one bill made of `items`, all lines sharing `bill_id` and
    /// `date`. A blank customer is recorded as the walk-in placeholder.
    ///
    /// Stock is not touched here; a sale goes through the billing engine.
    ///
    /// ## Errors
    /// - `Domain(EmptyCart)` if `items` is empty
    pub async fn append_bill_lines(
        &self,
        bill_id: &BillId,
        date: NaiveDateTime,
        customer: &str,
        items: &[LineItem],
    ) -> DbResult<Vec<BillLine>> {
        if items.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let customer = resolve_customer(Some(customer));
        let lines: Vec<BillLine> = items
            .iter()
            .map(|item| BillLine::from_line_item(bill_id, date, &customer, item))
            .collect();

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;
        for line in &lines {
            insert_line(&mut tx, line).await?;
        }
        tx.commit().await.map_err(DbError::transaction)?;

        info!(bill_id = %bill_id, lines = lines.len(), "Bill lines appended");
        Ok(lines)
    }

    /// Bill lines matching `query`; an empty query returns the whole ledger.
    pub async fn find_by_query(&self, query: &str) -> Vec<BillLine> {
        let lines: Vec<BillLine> = self
            .load()
            .await
            .into_iter()
            .filter(|line| line.matches_query(query))
            .collect();

        debug!(query = %query, count = lines.len(), "Searched bill ledger");
        lines
    }

    /// All lines of one bill, in the order they were billed.
    pub async fn lines_for_bill(&self, bill_id: &str) -> DbResult<Vec<BillLine>> {
        let lines = sqlx::query_as::<_, BillLine>(&format!(
            "{SELECT_LINE} WHERE bill_id = ?1 ORDER BY id"
        ))
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    /// Number of distinct bills.
    pub async fn count_bills(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(DISTINCT bill_id) FROM bills")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

pub(crate) async fn insert_line(conn: &mut SqliteConnection, line: &BillLine) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO bills (bill_id, date, product, quantity, price_cents, \
         subtotal_cents, tax_cents, total_cents, customer) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(&line.bill_id)
    .bind(line.date)
    .bind(&line.product)
    .bind(line.quantity)
    .bind(line.price_cents)
    .bind(line.subtotal_cents)
    .bind(line.tax_cents)
    .bind(line.total_cents)
    .bind(&line.customer)
    .execute(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use stockbook_core::{Product, DEFAULT_CUSTOMER};

    async fn repo() -> BillRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().bills()
    }

    fn moment() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(11, 20, 0)
            .unwrap()
    }

    fn item(id: i64, name: &str, quantity: i64, price_cents: i64) -> LineItem {
        let product = Product {
            product_id: id,
            name: name.to_string(),
            quantity: 100,
            price_cents,
            min_stock: 0,
        };
        LineItem::from_product(&product, quantity).unwrap()
    }

    #[tokio::test]
    async fn test_append_and_reload_bill() {
        let repo = repo().await;
        let id = BillId::new("AB12CD34");

        let written = repo
            .append_bill_lines(
                &id,
                moment(),
                "Alice",
                &[item(1, "Blue Pen", 4, 500), item(2, "Pad", 1, 250)],
            )
            .await
            .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0].total_cents, 2100);
        assert_eq!(repo.load().await, written);
        assert_eq!(repo.lines_for_bill("AB12CD34").await.unwrap(), written);
        assert!(repo.lines_for_bill("NOPE").await.unwrap().is_empty());
        assert_eq!(repo.count_bills().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_blank_customer_and_empty_bill() {
        let repo = repo().await;
        let id = BillId::new("00000001");

        let lines = repo
            .append_bill_lines(&id, moment(), "  ", &[item(1, "Pen", 1, 500)])
            .await
            .unwrap();
        assert_eq!(lines[0].customer, DEFAULT_CUSTOMER);

        let err = repo
            .append_bill_lines(&id, moment(), "Bob", &[])
            .await
            .unwrap_err();
        assert_eq!(err.as_domain(), Some(&CoreError::EmptyCart));
    }

    #[tokio::test]
    async fn test_find_by_query_matches_any_field() {
        let repo = repo().await;
        repo.append_bill_lines(&BillId::new("AB12CD34"), moment(), "Alice", &[item(1, "Blue Pen", 1, 500)])
            .await
            .unwrap();
        repo.append_bill_lines(&BillId::new("FF00FF00"), moment(), "Bob", &[item(2, "Notebook", 1, 250)])
            .await
            .unwrap();

        assert_eq!(repo.find_by_query("ab12").await.len(), 1);
        assert_eq!(repo.find_by_query("BOB").await[0].bill_id, "FF00FF00");
        assert_eq!(repo.find_by_query("pen").await[0].customer, "Alice");
        assert_eq!(repo.find_by_query("").await.len(), 2);
        assert!(repo.find_by_query("carol").await.is_empty());
    }
}
