use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::MatchResult;
use crate::{AssessmentResult, Opportunity, UserProfile};

/// Failure modes of the external scoring call. Every variant is recoverable:
/// the engine answers all of them with the rule-based fallback.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("scoring provider rejected the credentials")]
    InvalidCredentials,
    #[error("scoring provider rate limit exceeded")]
    RateLimited,
    #[error("scoring provider call timed out")]
    Timeout,
    #[error("network error reaching scoring provider: {0}")]
    Network(String),
    #[error("scoring provider API error: status={status}, body={body}")]
    Api { status: u16, body: String },
    #[error("malformed scoring response: {0}")]
    MalformedResponse(String),
}

/// Qualitative guidance the provider may attach to a batch. Parsed and
/// validated with the rest of the response, then dropped by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInsights {
    #[serde(default)]
    pub strong_matches: Vec<String>,
    #[serde(default)]
    pub development_opportunities: Vec<String>,
    #[serde(default)]
    pub suggested_skills: Vec<String>,
}

/// Raw provider output: one recommendation per candidate plus optional
/// batch-level insights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResponse {
    #[serde(default)]
    pub recommendations: Vec<MatchResult>,
    #[serde(default)]
    pub insights: Option<MatchInsights>,
}

/// Capability seam for AI-backed scoring. Implementations submit the whole
/// candidate set in one request and never retry: the engine's rule-based
/// fallback is the retry strategy.
#[async_trait]
pub trait ScoringProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn score(
        &self,
        profile: &UserProfile,
        assessment: Option<&AssessmentResult>,
        opportunities: &[Opportunity],
    ) -> Result<ScoringResponse, ProviderError>;
}

/// Contract check applied at the engine boundary to whatever a provider
/// returned: exactly one recommendation per requested opportunity, integer
/// percentage ≤ 100, alignments finite in [0, 1], at most three reasons.
/// Violations are failures, never coerced; the result comes back arranged in
/// input order so the stable sort downstream keeps input order on ties.
pub fn validate_recommendations(
    opportunities: &[Opportunity],
    response: ScoringResponse,
) -> Result<Vec<MatchResult>, ProviderError> {
    let recommendations = response.recommendations;

    if recommendations.len() != opportunities.len() {
        return Err(ProviderError::MalformedResponse(format!(
            "expected {} recommendations, got {}",
            opportunities.len(),
            recommendations.len()
        )));
    }

    let mut by_id: HashMap<String, MatchResult> = HashMap::with_capacity(recommendations.len());
    for recommendation in recommendations {
        check_recommendation(&recommendation)?;
        let id = recommendation.opportunity_id.clone();
        if by_id.insert(id.clone(), recommendation).is_some() {
            return Err(ProviderError::MalformedResponse(format!(
                "duplicate recommendation for opportunity {id}"
            )));
        }
    }

    let mut ordered = Vec::with_capacity(opportunities.len());
    for opportunity in opportunities {
        match by_id.remove(&opportunity.id) {
            Some(recommendation) => ordered.push(recommendation),
            None => {
                return Err(ProviderError::MalformedResponse(format!(
                    "no recommendation for opportunity {}",
                    opportunity.id
                )));
            }
        }
    }

    // Equal lengths plus full coverage imply no unknown ids remain.
    Ok(ordered)
}

fn check_recommendation(recommendation: &MatchResult) -> Result<(), ProviderError> {
    if recommendation.match_percentage > 100 {
        return Err(ProviderError::MalformedResponse(format!(
            "matchPercentage {} out of range for opportunity {}",
            recommendation.match_percentage, recommendation.opportunity_id
        )));
    }

    for (field, value) in [
        ("skillAlignment", recommendation.skill_alignment),
        ("interestAlignment", recommendation.interest_alignment),
        ("personalityAlignment", recommendation.personality_alignment),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ProviderError::MalformedResponse(format!(
                "{field} {value} out of range for opportunity {}",
                recommendation.opportunity_id
            )));
        }
    }

    if recommendation.reasons.len() > 3 {
        return Err(ProviderError::MalformedResponse(format!(
            "{} reasons for opportunity {} (limit 3)",
            recommendation.reasons.len(),
            recommendation.opportunity_id
        )));
    }

    Ok(())
}
