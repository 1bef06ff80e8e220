//! Health check handler

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::state::AppState;

/// Report service liveness and uptime
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
