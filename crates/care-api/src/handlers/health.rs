//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use care_service::dto::{HealthResponse, ReadinessResponse};
use serde_json::{json, Value};

use crate::response::ApiError;
use crate::state::AppState;

/// Service banner
///
/// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let app = &state.config().app;
    Json(json!({
        "message": format!("{} is running..", app.name),
        "environment": app.env,
    }))
}

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = database_reachable(&state).await;

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

async fn database_reachable(state: &AppState) -> bool {
    state.pool().acquire().await.is_ok()
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
