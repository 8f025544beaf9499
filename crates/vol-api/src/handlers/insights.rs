use axum::{Json, extract::State};
use vol_common::insights::{ImpactAnalysis, ImpactSnapshot};

use crate::SharedState;
use crate::error::ApiError;

/// Analyzer-backed report over the submitted participation history. There is
/// no rule-based fallback on this path; without a configured analyzer the
/// route answers 503.
pub async fn generate_impact_analysis(
    State(state): State<SharedState>,
    Json(snapshot): Json<ImpactSnapshot>,
) -> Result<Json<ImpactAnalysis>, ApiError> {
    let analyzer = state.impact.as_deref().ok_or_else(|| {
        ApiError::ServiceUnavailable("impact analysis requires a configured provider".into())
    })?;

    metrics::counter!("impact_requests_total").increment(1);

    let analysis = analyzer.analyze(&snapshot).await?;
    Ok(Json(analysis))
}
