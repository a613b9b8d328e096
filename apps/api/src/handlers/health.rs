//! `GET /health`

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub migrations: Option<MigrationInfo>,
}

#[derive(Debug, Serialize)]
pub struct MigrationInfo {
    pub total: usize,
    pub applied: usize,
}

/// 200 while the store answers queries, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if !state.db.health_check().await {
        warn!("Health check failed: database unreachable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: "unreachable",
                migrations: None,
            }),
        );
    }

    let migrations = state
        .db
        .migration_status()
        .await
        .ok()
        .map(|(total, applied)| MigrationInfo { total, applied });

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            database: "connected",
            migrations,
        }),
    )
}
