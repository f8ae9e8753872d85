//! # Report Commands
//!
//! Sales aggregations for the charts. Each command reads the sales log (and
//! the inventory for names) and returns data only; drawing is the UI's job.

use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use stockbook_core::reporting::{self, ProductSales, SalesHeatmap, WeekdaySales};

/// Units sold per weekday, Monday first.
pub async fn sales_by_weekday(db: &DbState) -> Result<Vec<WeekdaySales>, ApiError> {
    debug!("sales_by_weekday command");

    let transactions = db.inner().transactions().load().await;
    Ok(reporting::sales_by_day_of_week(&transactions))
}

/// Best sellers by units; `limit` defaults to the configured chart size.
pub async fn top_products(
    db: &DbState,
    config: &ConfigState,
    limit: Option<usize>,
) -> Result<Vec<ProductSales>, ApiError> {
    let limit = limit.unwrap_or(config.top_products_limit);
    debug!(limit, "top_products command");

    let transactions = db.inner().transactions().load().await;
    let inventory = db.inner().inventory().load().await;
    Ok(reporting::top_products(&transactions, &inventory, limit))
}

pub async fn sales_heatmap(db: &DbState) -> Result<SalesHeatmap, ApiError> {
    debug!("sales_heatmap command");

    let transactions = db.inner().transactions().load().await;
    let inventory = db.inner().inventory().load().await;
    Ok(reporting::sales_heatmap(&transactions, &inventory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use stockbook_core::{Money, TransactionRecord};
    use stockbook_db::{Database, DbConfig};

    fn sale(day: u32, product_id: i64, quantity_sold: i64) -> TransactionRecord {
        // 2024-03-04 is a Monday
        let moment = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        TransactionRecord::at(moment, product_id, quantity_sold)
    }

    async fn db() -> DbState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory()
            .add_product("Pen", 50, Money::from_cents(500), 5)
            .await
            .unwrap();
        db.inventory()
            .add_product("Notebook", 50, Money::from_cents(250), 5)
            .await
            .unwrap();
        db.transactions()
            .save(&[sale(4, 1, 3), sale(4, 2, 1), sale(6, 2, 5), sale(10, 1, 2)])
            .await
            .unwrap();
        DbState::new(db)
    }

    #[tokio::test]
    async fn test_sales_by_weekday() {
        let db = db().await;

        let days = sales_by_weekday(&db).await.unwrap();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday, Weekday::Mon);
        assert_eq!(days[0].quantity, 4);
        assert_eq!(days[2].quantity, 5);
        assert_eq!(days[6].weekday, Weekday::Sun);
        assert_eq!(days[6].quantity, 2);
    }

    #[tokio::test]
    async fn test_top_products_limit() {
        let db = db().await;
        let config = ConfigState::default();

        let top = top_products(&db, &config, None).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Notebook");
        assert_eq!(top[0].quantity, 6);
        assert_eq!(top[1].quantity, 5);

        let first = top_products(&db, &config, Some(1)).await.unwrap();
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_sales_heatmap() {
        let db = db().await;

        let heatmap = sales_heatmap(&db).await.unwrap();

        assert_eq!(heatmap.products, ["Pen", "Notebook"]);
        assert_eq!(heatmap.get(Weekday::Mon, "Pen"), Some(3));
        assert_eq!(heatmap.get(Weekday::Wed, "Notebook"), Some(5));
        assert_eq!(heatmap.get(Weekday::Tue, "Pen"), Some(0));
    }
}
