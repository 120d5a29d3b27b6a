//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (status, database) = match state.db.health_check().await {
        Ok(true) => ("ok", "connected"),
        _ => ("degraded", "unavailable"),
    };

    Json(ApiResponse::ok(HealthResponse {
        status,
        database,
        version: env!("CARGO_PKG_VERSION"),
    }))
}
