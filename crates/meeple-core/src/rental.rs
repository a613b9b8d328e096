//! # Rental Rules
//!
//! Stock availability, rental pricing and delay fees.
//!
//! ## Rental Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rental Lifecycle                                  │
//! │                                                                         │
//! │  1. CHECK STOCK                                                        │
//! │     └── StockSnapshot { stock_total, open_rentals }.ensure_available() │
//! │                                                                         │
//! │  2. QUOTE                                                              │
//! │     └── quote_rental(game, days) → days × price_per_day                │
//! │                                                                         │
//! │  3. OPEN                                                               │
//! │     └── Rental { rent_date: today, return_date: None,                  │
//! │                  original_price: quote, delay_fee: None }              │
//! │                                                                         │
//! │  4. RETURN                                                             │
//! │     └── delay_fee(rental, today) → late days × frozen daily price      │
//! │     └── Rental { return_date: today, delay_fee: Some(fee) }            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store re-checks the stock rule inside the same statement that inserts
//! the rental, so the snapshot here is what gets reported to the caller, not
//! what guarantees the invariant.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Game, GameId, Rental};
use crate::validation::validate_days_rented;

// =============================================================================
// Stock Snapshot
// =============================================================================

/// Point-in-time view of one game's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockSnapshot {
    pub game_id: GameId,
    /// Physical copies owned.
    pub stock_total: i64,
    /// Rentals of this game with no return date.
    pub open_rentals: i64,
}

impl StockSnapshot {
    pub const fn new(game_id: GameId, stock_total: i64, open_rentals: i64) -> Self {
        StockSnapshot {
            game_id,
            stock_total,
            open_rentals,
        }
    }

    /// Available iff more copies are owned than are out on rent.
    #[inline]
    pub const fn is_available(&self) -> bool {
        self.stock_total > self.open_rentals
    }

    /// Returns `GameUnavailable` when no copy is left.
    pub fn ensure_available(&self) -> CoreResult<()> {
        if self.is_available() {
            return Ok(());
        }

        Err(CoreError::GameUnavailable {
            game_id: self.game_id,
            stock_total: self.stock_total,
            open_rentals: self.open_rentals,
        })
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Price of renting `game` for `days_rented` days at its current daily price.
///
/// ## Example
/// ```rust
/// use meeple_core::rental::quote_rental;
/// use meeple_core::Game;
///
/// let game = Game {
///     id: 1,
///     name: "Azul".into(),
///     image: None,
///     category_id: 1,
///     stock_total: 3,
///     price_per_day: 1500,
/// };
/// assert_eq!(quote_rental(&game, 3).unwrap().cents(), 4500);
/// assert!(quote_rental(&game, 0).is_err());
/// ```
pub fn quote_rental(game: &Game, days_rented: i64) -> CoreResult<Money> {
    validate_days_rented(days_rented)?;

    game.daily_price()
        .checked_multiply_days(days_rented)
        .ok_or_else(|| overflow("daysRented", "rental price overflows"))
}

fn overflow(field: &str, reason: &str) -> CoreError {
    CoreError::Validation(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    })
}

/// Last day the game may be kept without a fee.
pub fn due_date(rental: &Rental) -> NaiveDate {
    rental.rent_date + chrono::Days::new(rental.days_rented.max(0) as u64)
}

/// Whole days past the due date, zero if returned on time.
pub fn days_late(rental: &Rental, returned_on: NaiveDate) -> i64 {
    (returned_on - due_date(rental)).num_days().max(0)
}

/// Fee charged for returning `rental` on `returned_on`.
///
/// ## Rule
/// Each day past `rent_date + days_rented` costs the rental's daily price as
/// it was when the rental opened (`original_price / days_rented`), so later
/// price changes never leak into old rentals.
///
/// ```text
/// rent_date=03-01, days_rented=3, original_price=4500 (1500/day)
///   returned 03-04 → due date, fee 0
///   returned 03-06 → 2 days late, fee 3000
/// ```
pub fn delay_fee(rental: &Rental, returned_on: NaiveDate) -> CoreResult<Money> {
    let per_day = rental.original_amount().per_day(rental.days_rented);
    per_day
        .checked_multiply_days(days_late(rental, returned_on))
        .ok_or_else(|| overflow("returnDate", "delay fee overflows"))
}

/// Closes `rental` as of `returned_on`, computing its delay fee.
///
/// ## Returns
/// * `Ok(fee)` - the fee to persist alongside `returned_on`
/// * `Err(CoreError::RentalAlreadyReturned)` - the rental was already closed
pub fn close_rental(rental: &Rental, returned_on: NaiveDate) -> CoreResult<Money> {
    if !rental.is_open() {
        return Err(CoreError::RentalAlreadyReturned(rental.id));
    }

    delay_fee(rental, returned_on)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn game(price_per_day: i64) -> Game {
        Game {
            id: 7,
            name: "Catan".to_string(),
            image: None,
            category_id: 1,
            stock_total: 2,
            price_per_day,
        }
    }

    fn rental() -> Rental {
        Rental {
            id: 1,
            customer_id: 1,
            game_id: 7,
            rent_date: date(3, 1),
            days_rented: 3,
            return_date: None,
            original_price: 4500,
            delay_fee: None,
        }
    }

    #[rstest]
    #[case(2, 0, true)]
    #[case(2, 1, true)]
    #[case(2, 2, false)]
    #[case(0, 0, false)]
    fn test_availability(#[case] stock: i64, #[case] open: i64, #[case] available: bool) {
        let snapshot = StockSnapshot::new(7, stock, open);
        assert_eq!(snapshot.is_available(), available);
        assert_eq!(snapshot.ensure_available().is_ok(), available);
    }

    #[test]
    fn test_unavailable_error_carries_counts() {
        let err = StockSnapshot::new(7, 2, 2).ensure_available().unwrap_err();
        assert!(matches!(
            err,
            CoreError::GameUnavailable {
                game_id: 7,
                stock_total: 2,
                open_rentals: 2
            }
        ));
    }

    #[test]
    fn test_quote_is_days_times_price() {
        assert_eq!(quote_rental(&game(1500), 3).unwrap().cents(), 4500);
        assert_eq!(quote_rental(&game(0), 5).unwrap().cents(), 0);
        assert!(quote_rental(&game(1500), 0).is_err());
        assert!(quote_rental(&game(i64::MAX), 2).is_err());
    }

    #[rstest]
    #[case(3, 0, 0)]
    #[case(4, 0, 0)]
    #[case(5, 1, 1500)]
    #[case(6, 2, 3000)]
    fn test_delay_fee(#[case] day: u32, #[case] late: i64, #[case] fee: i64) {
        let r = rental();
        assert_eq!(due_date(&r), date(3, 4));
        assert_eq!(days_late(&r, date(3, day)), late);
        assert_eq!(delay_fee(&r, date(3, day)).unwrap().cents(), fee);
    }

    #[test]
    fn test_delay_fee_overflow_is_an_error() {
        let r = Rental {
            original_price: i64::MAX,
            days_rented: 1,
            ..rental()
        };

        assert_eq!(days_late(&r, date(3, 4)), 2);
        assert!(matches!(
            delay_fee(&r, date(3, 4)),
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));
        assert!(close_rental(&r, date(3, 4)).is_err());
    }

    #[test]
    fn test_close_rental_twice_fails() {
        let mut r = rental();
        assert_eq!(close_rental(&r, date(3, 6)).unwrap().cents(), 3000);

        r.return_date = Some(date(3, 6));
        assert!(matches!(
            close_rental(&r, date(3, 7)),
            Err(CoreError::RentalAlreadyReturned(1))
        ));
    }
}
