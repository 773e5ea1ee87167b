//! # Seed Data Loader
//!
//! Fills a SQLite inventory file with the demo catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./inventario.db (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/inventario.db
//! ```
//!
//! A file that already holds products is left untouched.

use std::env;
use stockroom_db::seed::demo_catalog;
use stockroom_db::{Database, DbConfig, ProductRepository};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./inventario.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./inventario.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }

    println!("Stockroom Seed Data Loader");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");

    let mut repo = db.products();
    let existing = repo.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut inserted = 0;
    for product in demo_catalog() {
        let name = product.name.clone();
        if let Err(e) = repo.create(product).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }
        inserted += 1;
    }

    let low = repo.low_stock().await?;
    println!("✓ Inserted {} products ({} with low stock)", inserted, low.len());

    repo.close().await;
    println!("✓ Seed complete!");

    Ok(())
}
