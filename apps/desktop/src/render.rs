//! # Document Rendering
//!
//! Fixed-width plain-text receipts and purchase orders, 40 columns wide so
//! they fit a receipt printer, and "printing" them to a text file.
//!
//! ```text
//!                 INVOICE
//!           Stockbook Stationers
//! ----------------------------------------
//! Bill ID: 3F9A01BC
//! Date: 2024-03-04 15:30
//! Customer: Alice
//! ----------------------------------------
//! Item             Qty     Price     Total
//! ----------------------------------------
//! Pen                4₹     5.00₹    20.00
//! ----------------------------------------
//! Subtotal:                     ₹    20.00
//! Tax (5%):                     ₹     1.00
//! ----------------------------------------
//! TOTAL:                        ₹    21.00
//! ----------------------------------------
//!     Thank you for shopping with us!
//! ```

use chrono::NaiveDateTime;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::state::ConfigState;
use stockbook_core::{Money, PurchaseOrder, Receipt, TAX_RATE};

pub const WIDTH: usize = 40;

struct Rule;

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:-<WIDTH$}", "")
    }
}

/// Symbol plus a 9-wide right-aligned amount: 10 columns.
fn amount(config: &ConfigState, money: Money) -> String {
    format!("{}{:>9}", config.currency_symbol, money.to_decimal_string())
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// A committed bill laid out as a printed invoice.
pub struct ReceiptLayout<'a> {
    pub config: &'a ConfigState,
    pub receipt: &'a Receipt,
}

impl fmt::Display for ReceiptLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (config, receipt) = (self.config, self.receipt);

        writeln!(f, "{:^WIDTH$}", "INVOICE")?;
        writeln!(f, "{:^WIDTH$}", clip(&config.store_name, WIDTH))?;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "Bill ID: {}", receipt.bill_id)?;
        writeln!(f, "Date: {}", receipt.timestamp.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "Customer: {}", receipt.customer)?;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "{:<16}{:>4}{:>10}{:>10}", "Item", "Qty", "Price", "Total")?;
        writeln!(f, "{}", Rule)?;

        for item in &receipt.items {
            writeln!(
                f,
                "{:<16}{:>4}{}{}",
                clip(&item.name, 15),
                item.quantity,
                amount(config, item.unit_price()),
                amount(config, item.subtotal()),
            )?;
        }

        let tax_label = format!("Tax ({}%):", TAX_RATE.percentage());
        writeln!(f, "{}", Rule)?;
        writeln!(f, "{:<30}{}", "Subtotal:", amount(config, receipt.subtotal))?;
        writeln!(f, "{:<30}{}", tax_label, amount(config, receipt.tax))?;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "{:<30}{}", "TOTAL:", amount(config, receipt.total))?;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "{:^WIDTH$}", "Thank you for shopping with us!")
    }
}

/// A supplier order laid out for printing.
pub struct PurchaseOrderLayout<'a> {
    pub config: &'a ConfigState,
    pub order: &'a PurchaseOrder,
}

impl fmt::Display for PurchaseOrderLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (config, order) = (self.config, self.order);

        writeln!(f, "{:^WIDTH$}", "PURCHASE ORDER")?;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "From: {}", config.store_name)?;
        writeln!(f, "Date: {}", order.order_date.format("%Y-%m-%d"))?;
        writeln!(f, "Supplier: {}", order.supplier)?;
        writeln!(f, "Delivery By: {}", order.deliver_by.format("%Y-%m-%d"))?;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "{:<5}{:<20}{:>5}{:>10}", "ID", "Product", "Qty", "Price")?;
        writeln!(f, "{}", Rule)?;

        for line in &order.lines {
            writeln!(
                f,
                "{:<5}{:<20}{:>5}{}",
                line.product_id,
                clip(&line.name, 18),
                line.quantity_needed,
                amount(config, line.unit_price),
            )?;
        }

        writeln!(f, "{}", Rule)?;
        writeln!(f, "{:<30}{}", "TOTAL:", amount(config, order.total))?;
        writeln!(f, "{}", Rule)
    }
}

/// Renders a committed bill.
pub fn receipt_text(config: &ConfigState, receipt: &Receipt) -> String {
    ReceiptLayout { config, receipt }.to_string()
}

/// Renders a supplier order.
pub fn purchase_order_text(config: &ConfigState, order: &PurchaseOrder) -> String {
    PurchaseOrderLayout { config, order }.to_string()
}

/// Writes `content` to `receipt_<YYYYmmdd_HHMMSS>.txt` in `dir`.
///
/// The directory is created when missing. Returns the file path.
pub fn print_to_file(dir: &Path, content: &str, at: NaiveDateTime) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(at.format("receipt_%Y%m%d_%H%M%S.txt").to_string());
    fs::write(&path, content)?;

    info!(path = %path.display(), bytes = content.len(), "Document printed to file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fmt::Write;
    use stockbook_core::{purchase_order, BillId, Cart, Product};

    fn moment() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(15, 30, 9)
            .unwrap()
    }

    fn pen(quantity: i64) -> Product {
        Product {
            product_id: 1,
            name: "Pen".to_string(),
            quantity,
            price_cents: 500,
            min_stock: 5,
        }
    }

    fn receipt() -> Receipt {
        let mut cart = Cart::new();
        cart.add_line_item(&pen(10), 4).unwrap();
        cart.checkout(&BillId::new("3F9A01BC"), moment(), Some("Alice"))
            .unwrap()
            .receipt
    }

    #[test]
    fn test_receipt_layout() {
        let config = ConfigState::default();
        let text = receipt_text(&config, &receipt());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "INVOICE");
        assert!(text.contains("Bill ID: 3F9A01BC"));
        assert!(text.contains("Date: 2024-03-04 15:30"));
        assert!(text.contains("Customer: Alice"));
        assert!(text.contains(&format!("{:<30}₹{:>9}", "Subtotal:", "20.00")));
        assert!(text.contains(&format!("{:<30}₹{:>9}", "Tax (5%):", "1.00")));
        assert!(text.contains(&format!("{:<30}₹{:>9}", "TOTAL:", "21.00")));
        assert!(lines.iter().all(|l| l.chars().count() <= WIDTH));
    }

    #[test]
    fn test_long_names_are_clipped() {
        let config = ConfigState::default();
        let mut cart = Cart::new();
        let product = Product {
            name: "Extra Long Premium Fountain Pen".to_string(),
            ..pen(10)
        };
        cart.add_line_item(&product, 1).unwrap();
        let receipt = cart
            .checkout(&BillId::new("00000001"), moment(), None)
            .unwrap()
            .receipt;

        let text = receipt_text(&config, &receipt);
        assert!(text.contains("Extra Long Prem "));
        assert!(!text.contains("Fountain"));
        assert!(text.lines().all(|l| l.chars().count() <= WIDTH));
    }

    #[test]
    fn test_purchase_order_layout() {
        let config = ConfigState::default();
        let order = purchase_order::compose(&[pen(1)], "Acme Supplies", moment().date()).unwrap();

        let text = purchase_order_text(&config, &order);

        assert!(text.starts_with(&format!("{:^40}", "PURCHASE ORDER")));
        assert!(text.contains("Supplier: Acme Supplies"));
        assert!(text.contains("Delivery By: 2024-03-11"));
        assert!(text.contains(&format!("{:<5}{:<20}{:>5}₹{:>9}", 1, "Pen", 4, "5.00")));
        assert!(text.contains(&format!("{:<30}₹{:>9}", "TOTAL:", "20.00")));
    }

    #[test]
    fn test_document_streams_into_any_writer() {
        let config = ConfigState::default();
        let receipt = receipt();
        let mut out = String::from("COPY\n");

        let document = ReceiptLayout {
            config: &config,
            receipt: &receipt,
        };
        write!(out, "{}", document).unwrap();

        assert_eq!(out, format!("COPY\n{}", receipt_text(&config, &receipt)));
        assert!(out.ends_with("Thank you for shopping with us!\n"));
        assert_eq!(out.lines().filter(|l| *l == "-".repeat(WIDTH)).count(), 6);
    }

    #[test]
    fn test_print_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("prints");

        let path = print_to_file(&target, "hello", moment()).unwrap();

        assert_eq!(path.file_name().unwrap(), "receipt_20240304_153009.txt");
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}
