//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! This crate holds the inventory and billing rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Desktop UI (external)                        │   │
//! │  │   Inventory table ──► Bill window ──► Reports ──► Export        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockbook-desktop (command layer)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   types    money    cart    stock    purchase_order  reporting  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               stockbook-db (SQLite stores)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Persisted entities (Product, TransactionRecord, BillLine)
//! - [`money`] - Integer money and tax math
//! - [`cart`] - In-progress bill, totals, checkout
//! - [`stock`] - Low-stock monitor
//! - [`purchase_order`] - Supplier order composition
//! - [`reporting`] - Sales aggregations
//! - [`error`] / [`validation`] - Typed failures and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use stockbook_core::{Cart, Product};
//!
//! let pen = Product {
//!     product_id: 1,
//!     name: "Pen".to_string(),
//!     quantity: 10,
//!     price_cents: 500,
//!     min_stock: 3,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_line_item(&pen, 4).unwrap();
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.cents(), 2000);
//! assert_eq!(totals.tax.cents(), 100);
//! assert_eq!(totals.total.cents(), 2100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod purchase_order;
pub mod reporting;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartStatus, CartTotals, Checkout, LineItem, Receipt};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use purchase_order::{PurchaseOrder, PurchaseOrderLine};
pub use stock::{find_under_stocked, StockHealth};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The single sales tax rate applied to every bill: 5%.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(500);

/// Currency symbol used when displaying money.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Customer name recorded when the cashier leaves the field blank.
pub const DEFAULT_CUSTOMER: &str = "Walk-in Customer";
