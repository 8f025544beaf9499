use std::time::Instant;

use axum::{Json, extract::State};
use vol_common::api::{MatchRequest, MatchResponse};

use crate::SharedState;
use crate::error::ApiError;

pub async fn generate_matches(
    State(state): State<SharedState>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    if payload.user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("userId is required".into()));
    }

    metrics::counter!("match_requests_total").increment(1);
    let started = Instant::now();

    let matches = state
        .engine
        .generate_matches(
            state.scoring.as_deref(),
            &payload.user_id,
            &payload.user_profile,
            payload.assessment_result.as_ref(),
            &payload.opportunities,
        )
        .await;

    metrics::histogram!("match_request_duration_seconds").record(started.elapsed().as_secs_f64());

    Ok(Json(MatchResponse { matches }))
}
