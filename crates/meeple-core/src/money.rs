//! # Money Module
//!
//! Provides the `Money` type for rental prices and delay fees.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    pricePerDay = 1500 (15.00)                                           │
//! │    3 days → 4500 (45.00), exact every time                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices cross the wire and the database as plain integers; inside the
//! domain they are `Money`.
//!
//! ## Usage
//! ```rust
//! use meeple_core::money::Money;
//!
//! let per_day = Money::from_cents(1500);
//! let total = per_day.checked_multiply_days(3).unwrap();
//! assert_eq!(total.cents(), 4500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Game.price_per_day ──► quote_rental(days) ──► Rental.original_price   │
/// │                                                                         │
/// │  Rental.original_price / days_rented ──► delay_fee(late days)          │
/// │                                        ──► Rental.delay_fee            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use meeple_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a daily price by a number of days, returning `None` on
    /// overflow.
    ///
    /// ## Example
    /// ```rust
    /// use meeple_core::money::Money;
    ///
    /// let per_day = Money::from_cents(299);
    /// assert_eq!(per_day.checked_multiply_days(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_days(2), None);
    /// ```
    #[inline]
    pub fn checked_multiply_days(&self, days: i64) -> Option<Self> {
        self.0.checked_mul(days).map(Money)
    }

    /// Splits a total evenly across `days`, rounding down.
    ///
    /// Used to recover a rental's frozen daily price from its original price.
    /// Returns zero when `days` is not positive.
    #[inline]
    pub const fn per_day(&self, days: i64) -> Self {
        if days <= 0 {
            return Money(0);
        }
        Money(self.0 / days)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `major.minor` without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_per_day_rounds_down() {
        assert_eq!(Money::from_cents(4500).per_day(3).cents(), 1500);
        assert_eq!(Money::from_cents(1000).per_day(3).cents(), 333);
        assert_eq!(Money::from_cents(1000).per_day(0).cents(), 0);
    }

    #[test]
    fn test_checked_multiply_overflow() {
        assert_eq!(
            Money::from_cents(2).checked_multiply_days(4),
            Some(Money::from_cents(8))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_days(2), None);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_cents(4500)).unwrap();
        assert_eq!(json, "4500");
    }
}
