//! # Commands Module
//!
//! One async function per UI action. Each takes only the state it needs and
//! returns `Result<T, ApiError>`; every `T` serializes to JSON for the UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Inventory table, new product, add stock
//! ├── cart.rs      ◄─── Bill window: add lines, customer, commit
//! ├── bill.rs      ◄─── Bill history search
//! ├── stock.rs     ◄─── Low-stock report, purchase orders
//! ├── report.rs    ◄─── Sales charts
//! ├── document.rs  ◄─── Print to file, CSV export
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the database
//! list_products(&db, &config, Some("pen".into())).await?;
//!
//! // Only needs the cart
//! add_to_cart(&billing, &config, 1, 4).await?;
//! ```

pub mod bill;
pub mod cart;
pub mod config;
pub mod document;
pub mod product;
pub mod report;
pub mod stock;
