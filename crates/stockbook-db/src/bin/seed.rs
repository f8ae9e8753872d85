//! # Seed Data Generator
//!
//! Fills an empty database with a stationery catalogue and a few weeks of
//! bills so the reports have something to show.
//!
//! ## Usage
//! ```bash
//! # Four weeks of sales into ./stockbook_dev.db (default)
//! cargo run -p stockbook-db --bin seed
//!
//! # Custom database and history length
//! cargo run -p stockbook-db --bin seed -- --db ./data/stockbook.db --weeks 8
//! ```
//!
//! Bills go through the billing engine, so stock, the bill ledger and the
//! sales log stay consistent. Quantities and prices come from a fixed
//! formula, so every run produces the same data.

use chrono::{Duration, Local, NaiveTime};
use std::env;
use stockbook_core::{CoreError, Money};
use stockbook_db::{Database, DbConfig, DbError};

/// (name, price in paise, opening stock, reorder threshold)
const CATALOGUE: &[(&str, i64, i64, i64)] = &[
    ("Ball Pen Blue", 1000, 400, 50),
    ("Ball Pen Black", 1000, 350, 50),
    ("Gel Pen", 2500, 150, 30),
    ("Pencil HB", 500, 500, 80),
    ("Eraser", 500, 300, 40),
    ("Sharpener", 700, 200, 30),
    ("Notebook A5", 4500, 120, 25),
    ("Notebook A4", 6500, 80, 20),
    ("Sticky Notes", 3000, 60, 15),
    ("Stapler", 15000, 12, 5),
    ("Staple Pins", 2000, 40, 10),
    ("Glue Stick", 3500, 25, 10),
    ("Highlighter", 3000, 18, 10),
    ("Whiteboard Marker", 4000, 8, 10),
];

const CUSTOMERS: &[&str] = &["", "Asha", "Ravi", "", "Meera", "Imran", "", "Kiran"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockbook_dev.db");
    let mut weeks: i64 = 4;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--weeks" | "-w" => {
                if i + 1 < args.len() {
                    weeks = args[i + 1].parse().unwrap_or(4);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     Database file path (default: ./stockbook_dev.db)");
                println!("  -w, --weeks <N>     Weeks of sales history (default: 4)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockbook Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("History:  {} weeks", weeks);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.inventory().count().await?;
    if existing > 0 {
        println!("Database already has {} products, skipping seed.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    for (name, price_cents, quantity, min_stock) in CATALOGUE {
        db.inventory()
            .add_product(name, *quantity, Money::from_cents(*price_cents), *min_stock)
            .await?;
    }
    println!("Created {} products", CATALOGUE.len());

    let product_count = CATALOGUE.len() as i64;
    let today = Local::now().date_naive();
    let mut engine = db.billing();
    let mut bills = 0;
    let mut skipped = 0;

    for day in (1..=weeks * 7).rev() {
        let date = today - Duration::days(day);
        let bills_today = 2 + day % 4;

        for n in 0..bills_today {
            let seed = day * 31 + n * 7;
            let lines = 1 + seed % 3;

            for line in 0..lines {
                let product_id = 1 + (seed + line * 5) % product_count;
                let quantity = 1 + (seed + line) % 4;

                match engine.add_line_item(product_id, quantity).await {
                    Ok(_) => {}
                    Err(DbError::Domain(CoreError::InsufficientStock { .. })) => skipped += 1,
                    Err(e) => return Err(e.into()),
                }
            }

            if engine.cart().is_empty() {
                continue;
            }

            let hour = 9 + (seed % 10) as u32;
            let time = NaiveTime::from_hms_opt(hour, (seed % 60) as u32, 0).unwrap_or_default();
            let customer = CUSTOMERS[(seed as usize) % CUSTOMERS.len()];

            engine.commit_at(Some(customer), date.and_time(time)).await?;
            bills += 1;
        }
    }

    println!("Committed {} bills ({} lines skipped for stock)", bills, skipped);

    let low = stockbook_core::find_under_stocked(&db.inventory().load().await);
    println!("{} products below their reorder threshold", low.len());
    println!();
    println!("Seed complete.");

    Ok(())
}
