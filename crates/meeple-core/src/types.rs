//! # Domain Types
//!
//! Core domain types used throughout Meeple.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│      Game       │◄──│     Rental      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name (unique)  │   │  name (unique)  │   │  customer_id ───┼──┐    │
//! │  └─────────────────┘   │  category_id    │   │  game_id        │  │    │
//! │                        │  stock_total    │   │  rent_date      │  │    │
//! │                        │  price_per_day  │   │  days_rented    │  │    │
//! │                        └─────────────────┘   │  return_date    │  │    │
//! │                                              │  original_price │  │    │
//! │  ┌─────────────────┐                         │  delay_fee      │  │    │
//! │  │    Customer     │◄────────────────────────┴─────────────────┘──┘    │
//! │  │  ─────────────  │                                                    │
//! │  │  id, name       │                                                    │
//! │  │  phone          │                                                    │
//! │  │  cpf (unique)   │                                                    │
//! │  │  birthday       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every type serializes with camelCase field names (`categoryId`,
//! `pricePerDay`, `rentDate`, ...) and dates as `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Row id of a category.
pub type CategoryId = i64;
/// Row id of a game.
pub type GameId = i64;
/// Row id of a customer.
pub type CustomerId = i64;
/// Row id of a rental.
pub type RentalId = i64;

// =============================================================================
// Category
// =============================================================================

/// A game category ("Strategy", "Party", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Payload for `POST /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    /// Drops surrounding whitespace from the name, so `"Strategy "` and
    /// `"Strategy"` are the same category.
    pub fn trimmed(self) -> Self {
        NewCategory {
            name: self.name.trim().to_string(),
        }
    }
}

// =============================================================================
// Game
// =============================================================================

/// A board game title and its physical stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    /// Box-art URI.
    pub image: Option<String>,
    pub category_id: CategoryId,
    /// Physical copies owned by the shop.
    pub stock_total: i64,
    /// Price per rented day, in cents.
    pub price_per_day: i64,
}

impl Game {
    /// Returns the daily price as Money.
    #[inline]
    pub fn daily_price(&self) -> Money {
        Money::from_cents(self.price_per_day)
    }
}

/// A game joined with its category's display name (`GET /games`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameWithCategory {
    pub id: GameId,
    pub name: String,
    pub image: Option<String>,
    pub category_id: CategoryId,
    pub stock_total: i64,
    pub price_per_day: i64,
    pub category_name: String,
}

/// Payload for `POST /games`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewGame {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub category_id: CategoryId,
    pub stock_total: i64,
    pub price_per_day: i64,
}

impl NewGame {
    /// Drops surrounding whitespace from the name and image.
    pub fn trimmed(self) -> Self {
        NewGame {
            name: self.name.trim().to_string(),
            image: self.image.map(|image| image.trim().to_string()),
            ..self
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer. `cpf` is the customer's national identity number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub cpf: String,
    #[ts(as = "String")]
    pub birthday: NaiveDate,
}

/// Payload for `POST /customers` and `PUT /customers/{id}`.
///
/// `birthday` stays a string until validation has checked the
/// `YYYY-MM-DD` shape; see [`crate::validation::validate_customer`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInput {
    pub name: String,
    pub phone: String,
    pub cpf: String,
    pub birthday: String,
}

impl CustomerInput {
    /// Drops surrounding whitespace from the name. Phone, cpf and birthday
    /// are checked as sent.
    pub fn trimmed(self) -> Self {
        CustomerInput {
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

// =============================================================================
// Rental
// =============================================================================

/// A rental transaction. Open while `return_date` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Rental {
    pub id: RentalId,
    pub customer_id: CustomerId,
    pub game_id: GameId,
    #[ts(as = "String")]
    pub rent_date: NaiveDate,
    pub days_rented: i64,
    #[ts(as = "Option<String>")]
    pub return_date: Option<NaiveDate>,
    /// days_rented × price_per_day, frozen at creation.
    pub original_price: i64,
    pub delay_fee: Option<i64>,
}

impl Rental {
    /// Returns the original price as Money.
    #[inline]
    pub fn original_amount(&self) -> Money {
        Money::from_cents(self.original_price)
    }

    /// Returns true while the game has not been returned.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Payload for `POST /rentals`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewRental {
    pub customer_id: CustomerId,
    pub game_id: GameId,
    pub days_rented: i64,
}

/// Customer display fields embedded in a [`RentalView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RentalCustomer {
    pub id: CustomerId,
    pub name: String,
}

/// Game display fields embedded in a [`RentalView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RentalGame {
    pub id: GameId,
    pub name: String,
    pub category_id: CategoryId,
    pub category_name: String,
}

/// Denormalized rental returned by `GET /rentals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RentalView {
    pub id: RentalId,
    pub customer_id: CustomerId,
    pub game_id: GameId,
    #[ts(as = "String")]
    pub rent_date: NaiveDate,
    pub days_rented: i64,
    #[ts(as = "Option<String>")]
    pub return_date: Option<NaiveDate>,
    pub original_price: i64,
    pub delay_fee: Option<i64>,
    pub customer: RentalCustomer,
    pub game: RentalGame,
}

/// Filters for `GET /rentals`. Both filters combine with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RentalFilter {
    pub customer_id: Option<CustomerId>,
    pub game_id: Option<GameId>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rental(customer_id: i64, game_id: i64) -> Rental {
        Rental {
            id: 1,
            customer_id,
            game_id,
            rent_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            days_rented: 3,
            return_date: None,
            original_price: 4500,
            delay_fee: None,
        }
    }

    #[test]
    fn test_rental_serializes_camel_case_dates() {
        let value = serde_json::to_value(rental(1, 2)).unwrap();
        assert_eq!(value["customerId"], 1);
        assert_eq!(value["gameId"], 2);
        assert_eq!(value["rentDate"], "2026-03-01");
        assert_eq!(value["returnDate"], serde_json::Value::Null);
        assert_eq!(value["originalPrice"], 4500);
        assert_eq!(value["delayFee"], serde_json::Value::Null);
    }

    #[test]
    fn test_new_game_image_is_optional() {
        let game: NewGame = serde_json::from_value(json!({
            "name": "Azul",
            "categoryId": 1,
            "stockTotal": 3,
            "pricePerDay": 1500
        }))
        .unwrap();
        assert!(game.image.is_none());
        assert_eq!(game.stock_total, 3);
    }

    #[test]
    fn test_new_rental_rejects_fractional_days() {
        let parsed = serde_json::from_value::<NewRental>(json!({
            "customerId": 1,
            "gameId": 1,
            "daysRented": 2.5
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_trimmed_payloads() {
        let category = NewCategory {
            name: "  Strategy ".to_string(),
        }
        .trimmed();
        assert_eq!(category.name, "Strategy");

        let game = NewGame {
            name: " Azul\t".to_string(),
            image: Some(" https://example.com/azul.png ".to_string()),
            category_id: 1,
            stock_total: 3,
            price_per_day: 1500,
        }
        .trimmed();
        assert_eq!(game.name, "Azul");
        assert_eq!(game.image.as_deref(), Some("https://example.com/azul.png"));
        assert_eq!(game.stock_total, 3);

        let customer = CustomerInput {
            name: " Ana Souza ".to_string(),
            phone: "21998765432".to_string(),
            cpf: "12345678901".to_string(),
            birthday: "1990-05-17".to_string(),
        }
        .trimmed();
        assert_eq!(customer.name, "Ana Souza");
        assert_eq!(customer.cpf, "12345678901");
    }

    #[test]
    fn test_open_rental() {
        let mut r = rental(1, 1);
        assert!(r.is_open());
        r.return_date = NaiveDate::from_ymd_opt(2026, 3, 4);
        assert!(!r.is_open());
    }
}
