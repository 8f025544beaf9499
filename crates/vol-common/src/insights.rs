//! Program-level impact analysis contract. Unlike match scoring there is no
//! rule-based fallback here: analyzer failures surface to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderError;
use crate::{Opportunity, Participation};

/// Everything the analyzer sees: the participation history plus the
/// opportunities it references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSnapshot {
    #[serde(default)]
    pub participations: Vec<Participation>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationTrend {
    Increasing,
    #[default]
    Stable,
    Decreasing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub completion_rate: f64,
    pub participation_trend: ParticipationTrend,
}

/// Aggregate contribution toward one Sustainable Development Goal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdgImpact {
    #[serde(default)]
    pub sdg: String,
    #[serde(default)]
    pub projects: u32,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub participants: u32,
}

/// Analyzer output, served to admins as-is. `overall_metrics` and a valid
/// trend are required; the list sections may come back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub overall_metrics: OverallMetrics,
    #[serde(default)]
    pub sdg_impact: Vec<SdgImpact>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[async_trait]
pub trait ImpactAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn analyze(&self, snapshot: &ImpactSnapshot) -> Result<ImpactAnalysis, ProviderError>;
}
