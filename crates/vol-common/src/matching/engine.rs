use std::time::Duration;

use tracing::{debug, warn};

use super::{
    MatchResult,
    keywords::KeywordCatalog,
    reasons::build_reasons,
    scoring::RuleBasedScorer,
    weights::{FALLBACK_WEIGHTS, Weights},
};
use crate::provider::{ProviderError, ScoringProvider, validate_recommendations};
use crate::{AssessmentResult, Opportunity, UserProfile};

/// Hard ceiling on one provider round trip, independent of whatever timeout
/// the HTTP client below it enforces.
pub const DEFAULT_PROVIDER_DEADLINE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct MatchingEngineConfig {
    pub catalog: KeywordCatalog,
    pub weights: Weights,
    pub provider_deadline: Duration,
}

impl Default for MatchingEngineConfig {
    fn default() -> Self {
        Self {
            catalog: KeywordCatalog::default(),
            weights: FALLBACK_WEIGHTS,
            provider_deadline: DEFAULT_PROVIDER_DEADLINE,
        }
    }
}

pub struct MatchingEngine {
    scorer: RuleBasedScorer,
    weights: Weights,
    provider_deadline: Duration,
}

impl MatchingEngine {
    pub fn new(config: MatchingEngineConfig) -> Self {
        Self {
            scorer: RuleBasedScorer::new(config.catalog),
            weights: config.weights,
            provider_deadline: config.provider_deadline,
        }
    }

    pub fn default() -> Self {
        Self::new(MatchingEngineConfig::default())
    }

    /// Scores every candidate for one user and ranks the results.
    ///
    /// The provider, when present, gets the whole batch in a single call
    /// under `provider_deadline`. Any failure on that path — transport,
    /// timeout, or a response that breaks the one-per-candidate contract —
    /// is logged and answered with the rule-based scores, so this never
    /// fails outward. Ties in `match_percentage` keep candidate input order.
    pub async fn generate_matches(
        &self,
        provider: Option<&dyn ScoringProvider>,
        user_id: &str,
        profile: &UserProfile,
        assessment: Option<&AssessmentResult>,
        opportunities: &[Opportunity],
    ) -> Vec<MatchResult> {
        if opportunities.is_empty() {
            return Vec::new();
        }

        let mut matches = match self
            .provider_matches(provider, user_id, profile, assessment, opportunities)
            .await
        {
            Some(matches) => matches,
            None => {
                metrics::counter!("match_fallback_total").increment(1);
                opportunities
                    .iter()
                    .map(|opportunity| self.fallback_match(profile, assessment, opportunity))
                    .collect()
            }
        };

        // u8 keys and a stable sort: ties stay in input order.
        matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        matches
    }

    async fn provider_matches(
        &self,
        provider: Option<&dyn ScoringProvider>,
        user_id: &str,
        profile: &UserProfile,
        assessment: Option<&AssessmentResult>,
        opportunities: &[Opportunity],
    ) -> Option<Vec<MatchResult>> {
        let provider = provider?;

        let outcome = tokio::time::timeout(
            self.provider_deadline,
            provider.score(profile, assessment, opportunities),
        )
        .await
        .map_err(|_| ProviderError::Timeout)
        .and_then(|scored| scored)
        .and_then(|response| validate_recommendations(opportunities, response));

        match outcome {
            Ok(recommendations) => {
                debug!(
                    user_id,
                    provider = provider.name(),
                    candidates = opportunities.len(),
                    "provider scored full batch"
                );
                Some(recommendations)
            }
            Err(error) => {
                metrics::counter!("match_provider_errors_total").increment(1);
                warn!(
                    user_id,
                    provider = provider.name(),
                    error = %error,
                    "provider scoring failed; using rule-based fallback"
                );
                None
            }
        }
    }

    fn fallback_match(
        &self,
        profile: &UserProfile,
        assessment: Option<&AssessmentResult>,
        opportunity: &Opportunity,
    ) -> MatchResult {
        let breakdown = self.scorer.score(profile, assessment, opportunity);
        let raw = breakdown.raw_score(&self.weights);
        let match_percentage = raw.clamp(0.0, 100.0).round() as u8;

        let reasons = build_reasons(
            profile,
            opportunity,
            &breakdown.matched_interests,
            match_percentage,
        );

        MatchResult {
            opportunity_id: opportunity.id.clone(),
            match_percentage,
            reasons,
            skill_alignment: breakdown.interests,
            interest_alignment: breakdown.interests,
            personality_alignment: breakdown.personality,
        }
    }
}
