//! # meeple-core: Pure Business Logic for Meeple
//!
//! This crate is the **heart** of the rental shop. It contains the domain
//! types and every business rule as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Meeple Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP clients (JSON)                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum handlers)                     │   │
//! │  │    /categories, /games, /customers, /rentals                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ meeple-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  rental   │  │ validation│  │   │
//! │  │   │   Game    │  │   Money   │  │  stock    │  │  payload  │  │   │
//! │  │   │  Rental   │  │           │  │  pricing  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    meeple-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Game, Customer, Rental, projections)
//! - [`money`] - Money type with integer arithmetic
//! - [`rental`] - Availability, pricing and delay-fee rules
//! - [`error`] - Domain error types
//! - [`validation`] - Payload validation
//!
//! ## Example Usage
//!
//! ```rust
//! use meeple_core::money::Money;
//! use meeple_core::rental::StockSnapshot;
//!
//! // 3 days at 15.00 per day
//! let price = Money::from_cents(1500).checked_multiply_days(3).unwrap();
//! assert_eq!(price.cents(), 4500);
//!
//! // 2 copies, 2 out on rent: nothing left to hand out
//! let stock = StockSnapshot::new(1, 2, 2);
//! assert!(!stock.is_available());
//! ```

pub mod error;
pub mod money;
pub mod rental;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rental::StockSnapshot;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length for game and customer names.
pub const MIN_NAME_LENGTH: usize = 3;

/// Maximum length accepted for `?name=` / `?cpf=` search terms.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Wire format for every date in the API (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
