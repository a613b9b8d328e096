//! # Repository Module
//!
//! Database repository implementations for the rental shop.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.games().list(Some("azul"))                                 │
//! │       ▼                                                                 │
//! │  GameRepository                                                        │
//! │  ├── list(&self, name_filter)                                          │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── name_taken(&self, name)                                           │
//! │  └── insert(&self, game)                                               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups (`exists`, `name_taken`, `cpf_owner`) are single targeted
//! queries; nothing here loads a whole table to answer a yes/no question.
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Category listing and creation
//! - [`game::GameRepository`] - Game catalogue with name search
//! - [`customer::CustomerRepository`] - Customer CRUD with cpf search
//! - [`rental::RentalRepository`] - Stock checks, guarded rental inserts, returns

pub mod category;
pub mod customer;
pub mod game;
pub mod rental;

/// Builds a `LIKE` pattern matching `term` anywhere, with `%`, `_` and the
/// escape character itself taken literally. Use with `ESCAPE '\'`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
pub(crate) mod test_support {
    use meeple_core::{Category, Customer, CustomerInput, Game, NewCategory, NewGame};
    use chrono::NaiveDate;

    use crate::{Database, DbConfig};

    pub async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub async fn category(db: &Database, name: &str) -> Category {
        db.categories()
            .insert(&NewCategory {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn game(db: &Database, category_id: i64, name: &str, stock_total: i64) -> Game {
        db.games()
            .insert(&NewGame {
                name: name.to_string(),
                image: None,
                category_id,
                stock_total,
                price_per_day: 1500,
            })
            .await
            .unwrap()
    }

    pub async fn customer(db: &Database, name: &str, cpf: &str) -> Customer {
        let input = CustomerInput {
            name: name.to_string(),
            phone: "21998765432".to_string(),
            cpf: cpf.to_string(),
            birthday: "1990-05-17".to_string(),
        };
        let birthday = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
        db.customers().insert(&input, birthday).await.unwrap()
    }
}
