//! # Dataset Export
//!
//! Writes the inventory or the sales log to a CSV file with a header row.
//!
//! | kind        | dataset          | file                   |
//! |-------------|------------------|------------------------|
//! | `sales`     | transaction log  | `sales_report.csv`     |
//! | `inventory` | inventory        | `inventory_report.csv` |
//!
//! Prices are written as decimal text (`2.50`), dates as ISO text.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::error::ApiError;
use stockbook_core::{Product, TransactionRecord, ValidationError};

/// Which dataset to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Sales,
    Inventory,
}

impl ReportKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::Sales => "sales_report.csv",
            ReportKind::Inventory => "inventory_report.csv",
        }
    }
}

impl FromStr for ReportKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(ReportKind::Sales),
            "inventory" => Ok(ReportKind::Inventory),
            other => Err(ValidationError::InvalidFormat {
                field: "report type".to_string(),
                reason: format!("expected 'sales' or 'inventory', got '{}'", other),
            }),
        }
    }
}

#[derive(Serialize)]
struct InventoryRow<'a> {
    product_id: i64,
    name: &'a str,
    quantity: i64,
    price: String,
    min_stock: i64,
}

#[derive(Serialize)]
struct SalesRow {
    date: NaiveDate,
    time: NaiveTime,
    product_id: i64,
    quantity_sold: i64,
}

// The header is written explicitly so an empty dataset still gets one.
fn headerless<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(writer)
}

pub fn write_inventory<W: Write>(writer: W, products: &[Product]) -> csv::Result<()> {
    let mut csv = headerless(writer);
    csv.write_record(["product_id", "name", "quantity", "price", "min_stock"])?;
    for p in products {
        csv.serialize(InventoryRow {
            product_id: p.product_id,
            name: &p.name,
            quantity: p.quantity,
            price: p.price().to_decimal_string(),
            min_stock: p.min_stock,
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_sales<W: Write>(writer: W, records: &[TransactionRecord]) -> csv::Result<()> {
    let mut csv = headerless(writer);
    csv.write_record(["date", "time", "product_id", "quantity_sold"])?;
    for r in records {
        csv.serialize(SalesRow {
            date: r.date,
            time: r.time,
            product_id: r.product_id,
            quantity_sold: r.quantity_sold,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Dataset handed to [`export_to_dir`].
pub enum Dataset<'a> {
    Sales(&'a [TransactionRecord]),
    Inventory(&'a [Product]),
}

impl Dataset<'_> {
    pub fn kind(&self) -> ReportKind {
        match self {
            Dataset::Sales(_) => ReportKind::Sales,
            Dataset::Inventory(_) => ReportKind::Inventory,
        }
    }
}

/// Writes `dataset` into `dir` under its report file name, replacing any
/// previous export. Returns the file path.
pub fn export_to_dir(dir: &Path, dataset: Dataset<'_>) -> Result<PathBuf, ApiError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(dataset.kind().file_name());
    let file = fs::File::create(&path)?;

    let rows = match dataset {
        Dataset::Sales(records) => {
            write_sales(file, records)?;
            records.len()
        }
        Dataset::Inventory(products) => {
            write_inventory(file, products)?;
            products.len()
        }
    };

    info!(path = %path.display(), rows, "Report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(quantity: i64) -> Product {
        Product {
            product_id: 2,
            name: "Pad, ruled".to_string(),
            quantity,
            price_cents: 250,
            min_stock: 5,
        }
    }

    #[test]
    fn test_report_kind_parsing() {
        assert_eq!("sales".parse::<ReportKind>().unwrap(), ReportKind::Sales);
        assert_eq!(" Inventory ".parse::<ReportKind>().unwrap(), ReportKind::Inventory);
        assert!(matches!(
            "bills".parse::<ReportKind>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_inventory_csv() {
        let mut out = Vec::new();
        write_inventory(&mut out, &[pad(7)]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "product_id,name,quantity,price,min_stock\n2,\"Pad, ruled\",7,2.50,5\n"
        );
    }

    #[test]
    fn test_empty_sales_csv_still_has_header() {
        let mut out = Vec::new();
        write_sales(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "date,time,product_id,quantity_sold\n");
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let record = TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            time: NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            product_id: 2,
            quantity_sold: 3,
        };

        let path = export_to_dir(dir.path(), Dataset::Sales(&[record])).unwrap();

        assert_eq!(path, dir.path().join("sales_report.csv"));
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().nth(1), Some("2024-03-04,09:05:00,2,3"));
    }
}
