//! # Seed Data Generator
//!
//! Populates a database with demo categories, products and a few weeks of
//! sales history.
//!
//! ## Usage
//! ```bash
//! # Seed ./tally_dev.db with 14 days of history (default)
//! cargo run -p tally-db --bin seed
//!
//! # Custom history length
//! cargo run -p tally-db --bin seed -- --days 30
//!
//! # Specify database path
//! cargo run -p tally-db --bin seed -- --db ./data/tally.db
//! ```
//!
//! Prices are whole Rupiah. Sales are spread over the last `--days` days,
//! one to four checkouts per day, always within available stock.

use chrono::{Duration, Utc};
use std::env;
use tally_core::{CategoryInput, CheckoutItem, ProductInput, ReportWindow};
use tally_db::{Database, DbConfig};

/// (category, description, [(product, price)])
const CATALOG: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Electronics",
        "Phones and accessories",
        &[
            ("iPhone 15 Pro", 15_000_000),
            ("Samsung Galaxy A55", 5_999_000),
            ("USB-C Charger 20W", 249_000),
            ("Wireless Earbuds", 499_000),
        ],
    ),
    (
        "Food",
        "Instant meals and snacks",
        &[
            ("Indomie Goreng", 3_000),
            ("Chitato Sapi Panggang", 11_500),
            ("Roti Tawar", 16_000),
            ("Beng-Beng", 2_500),
        ],
    ),
    (
        "Drinks",
        "Bottled and boxed drinks",
        &[
            ("Teh Botol Sosro", 5_000),
            ("Aqua 600ml", 4_000),
            ("Kopi Kenangan", 18_000),
            ("Pocari Sweat", 8_500),
        ],
    ),
];

/// Stock given to every seeded product.
const INITIAL_STOCK: i64 = 500;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 14;
    let mut db_path = String::from("./tally_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-d" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(14);
                    i += 1;
                }
            }
            "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: seed [--days N] [--db PATH]");
                println!("  --days, -d  Days of sales history to generate (default: 14)");
                println!("  --db        Database path (default: ./tally_dev.db)");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tally POS Seed Data Generator");
    println!("   Database: {}", db_path);
    println!("   History:  {} days", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("📦 Creating catalog...");
    let mut product_ids = Vec::new();
    for (category, description, products) in CATALOG {
        let cat = db
            .categories()
            .create(&CategoryInput {
                name: category.to_string(),
                description: description.to_string(),
            })
            .await?;

        for (name, price) in products.iter() {
            let product = db
                .products()
                .create(&ProductInput {
                    name: name.to_string(),
                    price: *price,
                    stock: INITIAL_STOCK,
                    category_id: Some(cat.id),
                })
                .await?;
            product_ids.push(product.id);
        }
        println!("   {} ({} products)", category, products.len());
    }

    println!("🧾 Generating sales history...");
    let today = Utc::now();
    let mut checkouts = 0usize;
    for day in (0..days).rev() {
        let at = today - Duration::days(day);
        // Deterministic spread: 1-4 checkouts per day, rotating products.
        let per_day = (day % 4 + 1) as usize;
        for n in 0..per_day {
            let first = product_ids[(day as usize + n) % product_ids.len()];
            let second = product_ids[(day as usize * 3 + n + 1) % product_ids.len()];
            let quantity = (n as i64 % 3) + 1;

            let mut items = vec![CheckoutItem::new(first, quantity)];
            if first != second {
                items.push(CheckoutItem::new(second, 1));
            }

            db.transactions().checkout_at(&items, at).await?;
            checkouts += 1;
        }
    }
    println!("   {} checkouts", checkouts);

    let start = (today - Duration::days(days.max(1) - 1)).date_naive();
    let report = db
        .reports()
        .summarize(&ReportWindow::new(start, today.date_naive()))
        .await?;

    println!();
    println!("✅ Seed complete. Report for the seeded range:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    db.close().await;
    Ok(())
}
