//! # Error Types
//!
//! Domain-specific error types for meeple-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  meeple-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  meeple-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! │        DbError ─────────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, cpf, id)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to exactly one HTTP status in the API layer

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Game id does not exist.
    ///
    /// Kept distinct from [`CoreError::GameUnavailable`]: a missing game is
    /// not the same thing as a game with no copies left.
    #[error("Game not found: {0}")]
    GameNotFound(i64),

    /// Customer id does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    /// Rental id does not exist.
    #[error("Rental not found: {0}")]
    RentalNotFound(i64),

    /// Every copy of the game is out on an open rental.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /rentals { gameId: 7, ... }
    ///      │
    ///      ▼
    /// Stock check: stock_total=2, open_rentals=2
    ///      │
    ///      ▼
    /// GameUnavailable { game_id: 7, stock_total: 2, open_rentals: 2 }
    ///      │
    ///      ▼
    /// 400 GAME_UNAVAILABLE
    /// ```
    #[error("Game {game_id} is unavailable: {open_rentals} of {stock_total} copies rented")]
    GameUnavailable {
        game_id: i64,
        stock_total: i64,
        open_rentals: i64,
    },

    /// Another category or game already uses this name.
    #[error("{entity} name '{name}' already exists")]
    DuplicateName { entity: String, name: String },

    /// Another customer already uses this cpf.
    #[error("cpf '{0}' already belongs to another customer")]
    DuplicateCpf(String),

    /// The rental was already closed.
    #[error("Rental {0} was already returned")]
    RentalAlreadyReturned(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a payload doesn't meet requirements.
/// Used for early validation before any store access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid cpf, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The payload references a row that does not exist.
    #[error("{field} references unknown id {id}")]
    UnknownReference { field: String, id: i64 },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
