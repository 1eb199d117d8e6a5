//! Axum route handlers for the Matching API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::matcher::ScoredJob;
use crate::matching::MatchingError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchJobsResponse {
    pub recommended_jobs: Vec<ScoredJob>,
}

/// POST /match-jobs
///
/// Ranks every job against the user's resume. The request body is validated
/// before anything touches the record store or the network.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    payload: Result<Json<MatchJobsRequest>, JsonRejection>,
) -> Result<Json<MatchJobsResponse>, AppError> {
    let Json(request) = payload?;
    let user_id = parse_user_id(request.user_id.as_deref())?;

    let recommended_jobs = state.matcher.recommend(user_id).await?;

    Ok(Json(MatchJobsResponse { recommended_jobs }))
}

fn parse_user_id(raw: Option<&str>) -> Result<Uuid, MatchingError> {
    let raw = raw
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| MatchingError::Input("userId is required".to_string()))?;

    Uuid::parse_str(raw)
        .map_err(|_| MatchingError::Input(format!("userId '{raw}' is not a valid identifier")))
}
