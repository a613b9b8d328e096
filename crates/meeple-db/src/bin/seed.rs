//! # Seed Data Generator
//!
//! Populates the database with a demo catalogue for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./meeple_dev.db
//! cargo run -p meeple-db --bin seed
//!
//! # Specify database path
//! cargo run -p meeple-db --bin seed -- --db ./data/meeple.db
//! ```
//!
//! ## Generated Data
//! - A handful of categories (Strategy, Party, Cooperative, ...)
//! - Games in each category with stock between 1 and 4 copies
//! - Three demo customers

use std::env;

use chrono::NaiveDate;
use meeple_core::{CustomerInput, NewCategory, NewGame};
use meeple_db::{Database, DbConfig};

/// Categories and their games: (name, copies, price per day in cents)
const CATALOGUE: &[(&str, &[(&str, i64, i64)])] = &[
    (
        "Strategy",
        &[
            ("Catan", 3, 1500),
            ("Terraforming Mars", 2, 2500),
            ("Ticket to Ride", 4, 1200),
            ("Twilight Imperium", 1, 4000),
        ],
    ),
    (
        "Party",
        &[
            ("Codenames", 4, 800),
            ("Dixit", 2, 1000),
            ("Just One", 3, 700),
        ],
    ),
    (
        "Cooperative",
        &[
            ("Pandemic", 3, 1400),
            ("Spirit Island", 1, 2200),
            ("The Crew", 2, 600),
        ],
    ),
    (
        "Abstract",
        &[("Azul", 3, 1100), ("Santorini", 2, 1000), ("Hive", 2, 900)],
    ),
];

/// Demo customers: (name, phone, cpf, birthday)
const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("Ana Souza", "21998765432", "12345678901", "1990-05-17"),
    ("Bruno Lima", "1134567890", "98765432100", "1985-11-02"),
    ("Carla Mendes", "31987654321", "45678912345", "2001-01-30"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./meeple_dev.db");

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
                println!("Meeple Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./meeple_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Meeple Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.categories().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} categories", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut games = 0;
    for (category_name, titles) in CATALOGUE {
        let category = db
            .categories()
            .insert(&NewCategory {
                name: category_name.to_string(),
            })
            .await?;

        for (name, stock_total, price_per_day) in titles.iter() {
            let game = NewGame {
                name: name.to_string(),
                image: None,
                category_id: category.id,
                stock_total: *stock_total,
                price_per_day: *price_per_day,
            };

            if let Err(e) = db.games().insert(&game).await {
                eprintln!("Failed to insert {}: {}", game.name, e);
                continue;
            }
            games += 1;
        }
    }

    println!("✓ {} categories, {} games", CATALOGUE.len(), games);

    for (name, phone, cpf, birthday) in CUSTOMERS {
        let input = CustomerInput {
            name: name.to_string(),
            phone: phone.to_string(),
            cpf: cpf.to_string(),
            birthday: birthday.to_string(),
        };
        let birthday = NaiveDate::parse_from_str(birthday, meeple_core::DATE_FORMAT)?;

        db.customers().insert(&input, birthday).await?;
    }

    println!("✓ {} customers", CUSTOMERS.len());

    let listed = db.games().list(Some("an")).await?;
    println!("  Search 'an': {} games", listed.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
