use serde::{Deserialize, Serialize};

use crate::{AssessmentResult, Opportunity, UserProfile};

/// Matching request carrying the full candidate set. The caller owns data
/// access; this service scores exactly what it is handed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_profile: UserProfile,
    /// Older clients send the plural form.
    #[serde(default, alias = "assessmentResults")]
    pub assessment_result: Option<AssessmentResult>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
}
