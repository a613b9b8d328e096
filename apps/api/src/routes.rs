//! Route table.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{categories, customers, games, health, rentals};
use crate::state::AppState;

/// Builds the application router with tracing and CORS layers.
///
/// ```text
/// GET  POST  /categories
/// GET  POST  /games
/// GET  POST  /customers
/// GET  PUT   /customers/{id}
/// GET  POST  /rentals
///      POST  /rentals/{id}/return
/// GET        /health
/// ```
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route("/games", get(games::list).post(games::create))
        .route("/customers", get(customers::list).post(customers::create))
        .route("/customers/{id}", get(customers::get).put(customers::update))
        .route("/rentals", get(rentals::list).post(rentals::create))
        .route("/rentals/{id}/return", post(rentals::return_rental))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
