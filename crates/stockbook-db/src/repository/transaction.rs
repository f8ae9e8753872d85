//! # Transaction Log Repository
//!
//! Append-only log of units sold, one row per bill line. Reporting reads it;
//! nothing ever updates or deletes a record except a full `save`.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::inventory::fetch_product;
use stockbook_core::validation::validate_positive_quantity;
use stockbook_core::{CoreError, TransactionRecord};

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// The whole log in append order. Degrades to empty like the inventory.
    pub async fn load(&self) -> Vec<TransactionRecord> {
        let result = sqlx::query_as::<_, TransactionRecord>(
            "SELECT date, time, product_id, quantity_sold FROM transactions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(records) => {
                debug!(count = records.len(), "Loaded transaction log");
                records
            }
            Err(err) => {
                warn!(error = %err, "Transaction log unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Appends one record.
    ///
    /// ## Errors
    /// - `Domain(Validation)` if `quantity_sold` is not positive
    /// - `Domain(ProductNotFound)` if the product does not exist right now
    pub async fn append(&self, record: &TransactionRecord) -> DbResult<()> {
        validate_positive_quantity("quantity_sold", record.quantity_sold)?;

        let mut conn = self.pool.acquire().await?;
        if fetch_product(&mut *conn, record.product_id).await?.is_none() {
            return Err(CoreError::ProductNotFound(record.product_id).into());
        }
        insert_record(&mut conn, record).await
    }

    /// Replaces the whole log, atomically.
    pub async fn save(&self, records: &[TransactionRecord]) -> DbResult<()> {
        for record in records {
            validate_positive_quantity("quantity_sold", record.quantity_sold)?;
        }

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;
        sqlx::query("DELETE FROM transactions").execute(&mut *tx).await?;
        for record in records {
            insert_record(&mut tx, record).await?;
        }
        tx.commit().await.map_err(DbError::transaction)?;

        debug!(count = records.len(), "Saved transaction log");
        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Inserts without checks; the caller has validated the record.
pub(crate) async fn insert_record(
    conn: &mut SqliteConnection,
    record: &TransactionRecord,
) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO transactions (date, time, product_id, quantity_sold) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(record.date)
    .bind(record.time)
    .bind(record.product_id)
    .bind(record.quantity_sold)
    .execute(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{NaiveDate, NaiveTime};
    use stockbook_core::Money;

    async fn db_with_pen() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory()
            .add_product("Pen", 10, Money::from_cents(500), 3)
            .await
            .unwrap();
        db
    }

    fn record(product_id: i64, quantity_sold: i64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            time: NaiveTime::from_hms_opt(16, 45, 30).unwrap(),
            product_id,
            quantity_sold,
        }
    }

    #[tokio::test]
    async fn test_append_then_load() {
        let db = db_with_pen().await;
        let log = db.transactions();

        log.append(&record(1, 2)).await.unwrap();
        log.append(&record(1, 5)).await.unwrap();

        assert_eq!(log.load().await, vec![record(1, 2), record(1, 5)]);
        assert_eq!(log.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_append_validates_record() {
        let db = db_with_pen().await;
        let log = db.transactions();

        assert!(matches!(
            log.append(&record(1, 0)).await,
            Err(DbError::Domain(CoreError::Validation(_)))
        ));
        assert!(matches!(
            log.append(&record(9, 1)).await,
            Err(DbError::Domain(CoreError::ProductNotFound(9)))
        ));
        assert!(log.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_log_and_keeps_unknown_products() {
        let db = db_with_pen().await;
        let log = db.transactions();
        log.append(&record(1, 1)).await.unwrap();

        // Historical product ids are not re-checked
        let history = vec![record(1, 3), record(77, 4)];
        log.save(&history).await.unwrap();

        assert_eq!(log.load().await, history);
    }
}
