//! Feature generation handler

use axum::{extract::State, Json};
use tracing::info;

use reposcribe_analysis::{package_as, FEATURE_FILENAME};

use crate::error::{ApiError, ApiResult};
use crate::models::{GenerateFeatureRequest, GenerateFeatureResponse, PayloadDto};
use crate::state::AppState;

/// Generate code for a feature description and return it packaged
pub async fn generate_feature(
    State(state): State<AppState>,
    Json(request): Json<GenerateFeatureRequest>,
) -> ApiResult<Json<GenerateFeatureResponse>> {
    if request.feature.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "feature description must not be empty".to_string(),
        ));
    }

    info!(feature = %request.feature, "Feature generation request");

    let code = state.analyzer.generate_feature(&request.feature).await;

    let payload = package_as(&code, state.max_inline_chars, FEATURE_FILENAME);
    Ok(Json(GenerateFeatureResponse {
        feature_code: PayloadDto::from(payload),
    }))
}
