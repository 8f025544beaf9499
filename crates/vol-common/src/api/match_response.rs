use serde::{Deserialize, Serialize};

use crate::TopStrength;
use crate::matching::MatchResult;
use crate::suggestions::strength_suggestions;

/// Body of a successful matching call: every requested opportunity scored,
/// best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}

/// Static activity catalog for one dominant strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub top_strength: TopStrength,
    pub suggestions: Vec<String>,
}

impl SuggestionsResponse {
    pub fn for_strength(top_strength: TopStrength) -> Self {
        Self {
            top_strength,
            suggestions: strength_suggestions(top_strength)
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}
