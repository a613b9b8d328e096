//! `/games` handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;
use meeple_core::validation::{validate_game, validate_search_term};
use meeple_core::{CoreError, Game, GameWithCategory, NewGame, ValidationError};

#[derive(Debug, Default, Deserialize)]
pub struct GameQuery {
    pub name: Option<String>,
}

/// `GET /games?name=`
///
/// `name` is a case-insensitive substring of the game name.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<GameQuery>,
) -> ApiResult<Json<Vec<GameWithCategory>>> {
    let name = validate_search_term("name", query.name.as_deref())?;
    Ok(Json(state.db.games().list(name.as_deref()).await?))
}

/// `POST /games`
///
/// ## Checks, in order
/// 1. Payload shape (400)
/// 2. `categoryId` refers to an existing category (400)
/// 3. Name not taken (409)
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewGame>,
) -> ApiResult<(StatusCode, Json<Game>)> {
    let payload = payload.trimmed();
    validate_game(&payload)?;

    if !state.db.categories().exists(payload.category_id).await? {
        warn!(category_id = payload.category_id, "Game references unknown category");
        return Err(ValidationError::UnknownReference {
            field: "categoryId".to_string(),
            id: payload.category_id,
        }
        .into());
    }

    let games = state.db.games();
    if games.name_taken(&payload.name).await? {
        warn!(name = %payload.name, "Game name already exists");
        return Err(CoreError::DuplicateName {
            entity: "Game".to_string(),
            name: payload.name,
        }
        .into());
    }

    let game = games.insert(&payload).await?;
    info!(id = game.id, category_id = game.category_id, "Game registered");

    Ok((StatusCode::CREATED, Json(game)))
}
