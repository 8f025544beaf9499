use serde::{Deserialize, Serialize};

pub mod engine;
pub mod interests;
pub mod keywords;
pub mod reasons;
pub mod scoring;
pub mod weights;

pub use engine::{MatchingEngine, MatchingEngineConfig};
pub use keywords::KeywordCatalog;
pub use scoring::{FactorBreakdown, RuleBasedScorer};
pub use weights::{FALLBACK_WEIGHTS, Weights};

/// One scored opportunity, AI-ranked or rule-based. Built fresh per call and
/// serialized as-is on the wire (camelCase, like the rest of the platform).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub opportunity_id: String,
    /// Integer percentage in 0–100.
    pub match_percentage: u8,
    /// Up to three human-readable justifications, most relevant first.
    pub reasons: Vec<String>,
    pub skill_alignment: f64,
    /// Currently always equal to `skill_alignment`; both derive from the same
    /// interest-overlap ratio.
    pub interest_alignment: f64,
    pub personality_alignment: f64,
}
