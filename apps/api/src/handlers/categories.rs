//! `/categories` handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;
use meeple_core::validation::validate_category;
use meeple_core::{Category, CoreError, NewCategory};

/// `GET /categories`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

/// `POST /categories`
///
/// Names are trimmed first. 400 on an empty name, 409 when the name is taken.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let payload = payload.trimmed();
    validate_category(&payload)?;

    let categories = state.db.categories();
    if categories.name_taken(&payload.name).await? {
        warn!(name = %payload.name, "Category name already exists");
        return Err(CoreError::DuplicateName {
            entity: "Category".to_string(),
            name: payload.name,
        }
        .into());
    }

    let category = categories.insert(&payload).await?;
    info!(id = category.id, "Category registered");

    Ok((StatusCode::CREATED, Json(category)))
}
