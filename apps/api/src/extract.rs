//! Request extractors that reject bad input with the API's JSON error body.
//!
//! axum's own `Json` and `Path` rejections answer with plain text and a mix
//! of 400/415/422. These wrappers turn every malformed body or id into a
//! `400 VALIDATION_ERROR`.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use meeple_core::ValidationError;

/// JSON body extractor with [`ApiError`] rejections.
///
/// ```rust,ignore
/// async fn create(ApiJson(payload): ApiJson<NewGame>) -> ApiResult<...> { ... }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::validation(format!(
                "Invalid JSON body: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Parses a numeric id taken from a path segment or query string.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be an integer id".to_string(),
        }
        .into()
    })
}

/// Parses an optional id filter; a blank value counts as absent.
pub fn parse_optional_id(field: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_id(field, raw).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("id", "42").unwrap(), 42);
        assert_eq!(parse_id("id", " 7 ").unwrap(), 7);

        let err = parse_id("id", "abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(parse_id("id", "1.5").is_err());
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id("gameId", None).unwrap(), None);
        assert_eq!(parse_optional_id("gameId", Some("")).unwrap(), None);
        assert_eq!(parse_optional_id("gameId", Some("3")).unwrap(), Some(3));
        assert!(parse_optional_id("gameId", Some("three")).is_err());
    }
}
