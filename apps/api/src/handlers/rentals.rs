//! `/rentals` handlers.
//!
//! ## Rental Creation
//! ```text
//! POST /rentals { customerId, gameId, daysRented }
//!      │
//!      ├── daysRented > 0 ?                     no ──► 400
//!      ├── customer exists ?                    no ──► 404
//!      ├── game exists ?                        no ──► 404
//!      ├── quote = daysRented × pricePerDay
//!      ▼
//! create_guarded(...)  (stock check + insert in one statement)
//!      ├── Created      ──► 201 + rental
//!      └── Unavailable  ──► 400 GAME_UNAVAILABLE
//! ```

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::extract::{parse_id, parse_optional_id, ApiJson};
use crate::state::AppState;
use meeple_core::rental::{close_rental, quote_rental};
use meeple_core::validation::validate_days_rented;
use meeple_core::{CoreError, NewRental, Rental, RentalFilter, RentalView};
use meeple_db::RentalInsert;

/// Raw query string; ids are parsed by hand so bad ones get a JSON 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalQuery {
    pub customer_id: Option<String>,
    pub game_id: Option<String>,
}

/// `GET /rentals?customerId=&gameId=`
///
/// Both filters apply together. A filter naming an unknown customer or game
/// is a 404 rather than an empty list.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RentalQuery>,
) -> ApiResult<Json<Vec<RentalView>>> {
    let filter = RentalFilter {
        customer_id: parse_optional_id("customerId", query.customer_id.as_deref())?,
        game_id: parse_optional_id("gameId", query.game_id.as_deref())?,
    };

    if let Some(customer_id) = filter.customer_id {
        if !state.db.customers().exists(customer_id).await? {
            return Err(CoreError::CustomerNotFound(customer_id).into());
        }
    }

    if let Some(game_id) = filter.game_id {
        if !state.db.games().exists(game_id).await? {
            return Err(CoreError::GameNotFound(game_id).into());
        }
    }

    Ok(Json(state.db.rentals().list(&filter).await?))
}

/// `POST /rentals`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewRental>,
) -> ApiResult<(StatusCode, Json<Rental>)> {
    validate_days_rented(payload.days_rented)?;

    if !state.db.customers().exists(payload.customer_id).await? {
        return Err(CoreError::CustomerNotFound(payload.customer_id).into());
    }

    let game = state
        .db
        .games()
        .get_by_id(payload.game_id)
        .await?
        .ok_or(CoreError::GameNotFound(payload.game_id))?;

    let original_price = quote_rental(&game, payload.days_rented)?;

    match state
        .db
        .rentals()
        .create_guarded(&payload, state.today(), original_price)
        .await?
    {
        RentalInsert::Created(rental) => {
            info!(
                id = rental.id,
                customer_id = rental.customer_id,
                game_id = rental.game_id,
                "Rental opened"
            );
            Ok((StatusCode::CREATED, Json(rental)))
        }
        RentalInsert::Unavailable(snapshot) => {
            warn!(
                game_id = snapshot.game_id,
                stock_total = snapshot.stock_total,
                open_rentals = snapshot.open_rentals,
                "Game unavailable"
            );
            snapshot.ensure_available()?;

            // The guard and the snapshot share one write transaction, so a
            // refused insert always comes with an exhausted snapshot.
            error!(game_id = snapshot.game_id, "Guarded insert refused a free copy");
            Err(ApiError::new(
                ErrorCode::DatabaseError,
                "Rental could not be created",
            ))
        }
    }
}

/// `POST /rentals/{id}/return`
///
/// Closes the rental today and charges the delay fee, if any.
pub async fn return_rental(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Rental>> {
    let id = parse_id("id", &raw_id)?;
    let today = state.today();

    let rentals = state.db.rentals();
    let rental = rentals
        .get_by_id(id)
        .await?
        .ok_or(CoreError::RentalNotFound(id))?;

    let fee = close_rental(&rental, today)?;

    // None here means another request closed it first
    let closed = rentals
        .mark_returned(id, today, fee)
        .await?
        .ok_or(CoreError::RentalAlreadyReturned(id))?;

    info!(id = id, delay_fee = fee.cents(), "Rental closed");
    Ok(Json(closed))
}
