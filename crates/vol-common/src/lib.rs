use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

pub mod api;
pub mod insights;
pub mod logging;
pub mod matching;
pub mod provider;
pub mod suggestions;
pub mod text;

// Core data models shared by the matching engine and the HTTP surface.
// Every scoring-relevant field defaults when absent so one malformed record
// degrades to empty/zero contributions instead of rejecting the whole batch.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Display only, never scored.
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TopStrength {
    Execution,
    Relationship,
    Strategic,
    Thinking,
}

/// Latest strengths-assessment outcome for a user. Only `top_strength`
/// participates in scoring; the profile maps are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub top_strength: TopStrength,
    #[serde(default)]
    pub personality_profile: HashMap<String, f64>,
    #[serde(default)]
    pub strength_distribution: HashMap<String, u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpportunityKind {
    Lab,
    #[default]
    Mision,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: OpportunityKind,
    #[serde(default)]
    pub location: String,
    /// Expected commitment in hours.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub sdgs: Vec<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_volunteers: Option<u32>,
    #[serde(default)]
    pub current_volunteers: Option<u32>,
}

/// One user's enrollment in an opportunity; input to impact analysis only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub opportunity_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub hours_completed: u32,
    #[serde(default)]
    pub rating: Option<f64>,
}
