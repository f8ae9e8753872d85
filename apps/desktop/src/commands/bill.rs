//! # Bill History Commands
//!
//! Searches the bill ledger. The ledger is read-only from here; lines are
//! only ever written by `commit_bill`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use stockbook_core::BillLine;

/// One ledger row with its amounts formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineDto {
    #[serde(flatten)]
    pub line: BillLine,
    pub total_display: String,
}

impl BillLineDto {
    fn from_line(line: BillLine, config: &ConfigState) -> Self {
        BillLineDto {
            total_display: config.format_currency(line.total_cents),
            line,
        }
    }
}

/// Bill lines whose bill id, customer or product contains `query`
/// (case-insensitive). A blank query returns the whole ledger.
pub async fn search_bills(
    db: &DbState,
    config: &ConfigState,
    query: Option<String>,
) -> Result<Vec<BillLineDto>, ApiError> {
    let query = query.unwrap_or_default();
    debug!(query = %query, "search_bills command");

    let lines = db.inner().bills().find_by_query(&query).await;
    Ok(lines
        .into_iter()
        .map(|line| BillLineDto::from_line(line, config))
        .collect())
}

/// All lines of one bill.
pub async fn get_bill(
    db: &DbState,
    config: &ConfigState,
    bill_id: String,
) -> Result<Vec<BillLineDto>, ApiError> {
    debug!(bill_id = %bill_id, "get_bill command");

    let lines = db.inner().bills().lines_for_bill(bill_id.trim()).await?;
    if lines.is_empty() {
        return Err(ApiError::not_found("Bill", bill_id));
    }

    Ok(lines
        .into_iter()
        .map(|line| BillLineDto::from_line(line, config))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockbook_core::Money;
    use stockbook_db::{Database, DbConfig};

    async fn db_with_bill() -> (DbState, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let inventory = db.inventory();
        inventory
            .add_product("Pen", 10, Money::from_cents(500), 3)
            .await
            .unwrap();
        inventory
            .add_product("Notebook", 10, Money::from_cents(250), 3)
            .await
            .unwrap();

        let mut engine = db.billing();
        engine.add_line_item(1, 2).await.unwrap();
        engine.add_line_item(2, 1).await.unwrap();
        let receipt = engine.commit(Some("Alice")).await.unwrap();

        (DbState::new(db), receipt.bill_id.as_str().to_string())
    }

    #[tokio::test]
    async fn test_search_bills() {
        let (db, bill_id) = db_with_bill().await;
        let config = ConfigState::default();

        let all = search_bills(&db, &config, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|dto| dto.line.bill_id == bill_id));

        let by_customer = search_bills(&db, &config, Some("alice".to_string()))
            .await
            .unwrap();
        assert_eq!(by_customer.len(), 2);

        let by_product = search_bills(&db, &config, Some("note".to_string()))
            .await
            .unwrap();
        assert_eq!(by_product.len(), 1);
        assert_eq!(by_product[0].line.product, "Notebook");
        assert_eq!(by_product[0].total_display, "₹2.63");

        let none = search_bills(&db, &config, Some("zzz".to_string()))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_bill() {
        let (db, bill_id) = db_with_bill().await;
        let config = ConfigState::default();

        let lines = get_bill(&db, &config, bill_id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line.product, "Pen");

        let err = get_bill(&db, &config, "NOPE0000".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
