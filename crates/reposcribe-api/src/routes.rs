//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{analyze, generate, health},
    state::AppState,
};

/// API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/analyze", post(analyze::analyze_repository))
        .route("/generate-feature", post(generate::generate_feature))
}
