//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Meeple                                 │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │       │                                                                 │
//! │       ├── ValidationError / CoreError::Validation ──► 400 VALIDATION   │
//! │       ├── CoreError::GameUnavailable ──────────────► 400 UNAVAILABLE   │
//! │       ├── CoreError::*NotFound / DbError::NotFound ► 404 NOT_FOUND     │
//! │       ├── CoreError::Duplicate* / UniqueViolation ─► 409 CONFLICT      │
//! │       └── any other DbError ───────────────────────► 500 DATABASE      │
//! │                                                     (logged, no detail) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! { "code": "NOT_FOUND", "message": "Customer not found: 42" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use meeple_core::{CoreError, ValidationError};
use meeple_db::DbError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned from HTTP handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or out-of-range input (400)
    ValidationError,

    /// No copy of the game is free (400)
    GameUnavailable,

    /// Referenced id absent (404)
    NotFound,

    /// Unique field already used (409)
    Conflict,

    /// Store failure (500)
    DatabaseError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError | ErrorCode::GameUnavailable => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::conflict(format!("{} '{}' already exists", field, value))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::PoolExhausted => {
                error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable")
            }
            other => {
                // Log the actual error but return a generic message
                error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::GameNotFound(_)
            | CoreError::CustomerNotFound(_)
            | CoreError::RentalNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::GameUnavailable { .. } => {
                ApiError::new(ErrorCode::GameUnavailable, err.to_string())
            }
            CoreError::DuplicateName { .. } | CoreError::DuplicateCpf(_) => {
                ApiError::conflict(err.to_string())
            }
            CoreError::RentalAlreadyReturned(_) => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CoreError::GameNotFound(3), StatusCode::NOT_FOUND)]
    #[case(CoreError::CustomerNotFound(3), StatusCode::NOT_FOUND)]
    #[case(CoreError::DuplicateCpf("12345678901".into()), StatusCode::CONFLICT)]
    #[case(CoreError::RentalAlreadyReturned(1), StatusCode::BAD_REQUEST)]
    #[case(
        CoreError::GameUnavailable { game_id: 1, stock_total: 1, open_rentals: 1 },
        StatusCode::BAD_REQUEST
    )]
    fn test_core_error_status(#[case] err: CoreError, #[case] status: StatusCode) {
        assert_eq!(ApiError::from(err).status(), status);
    }

    #[test]
    fn test_unavailable_has_its_own_code() {
        let err = ApiError::from(CoreError::GameUnavailable {
            game_id: 1,
            stock_total: 2,
            open_rentals: 2,
        });
        assert_eq!(err.code, ErrorCode::GameUnavailable);
    }

    #[test]
    fn test_db_failures_hide_detail() {
        let err = ApiError::from(DbError::QueryFailed("no such table: games".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("games"));

        let err = ApiError::from(DbError::duplicate("cpf", "12345678901"));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let body = serde_json::to_value(ApiError::not_found("Game", "9")).unwrap();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Game not found: 9");
    }
}
