//! Repository analysis handler

use axum::{extract::State, Json};
use tracing::info;

use reposcribe_analysis::package;

use crate::error::{ApiError, ApiResult};
use crate::models::{AnalyzeRequest, AnalyzeResponse, PayloadDto};
use crate::state::AppState;

/// Analyze a repository branch and return the packaged report.
///
/// The aggregator never fails; a degraded run still returns renderable
/// text, so this handler only rejects malformed input.
pub async fn analyze_repository(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    if request.owner.is_empty() {
        return Err(ApiError::BadRequest("owner must not be empty".to_string()));
    }
    if request.repo.is_empty() {
        return Err(ApiError::BadRequest("repo must not be empty".to_string()));
    }
    let branch = request.branch.unwrap_or_else(|| "main".to_string());

    info!(owner = %request.owner, repo = %request.repo, branch = %branch, "Analyze request");

    let report = state
        .aggregator
        .analyze_repository(&request.owner, &request.repo, &branch)
        .await;

    let payload = package(&report, state.max_inline_chars);
    Ok(Json(AnalyzeResponse {
        analysis: PayloadDto::from(payload),
    }))
}
