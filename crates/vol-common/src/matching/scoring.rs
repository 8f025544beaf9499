use crate::{AssessmentResult, Opportunity, UserProfile};

use super::interests::interest_overlap;
use super::keywords::KeywordCatalog;
use super::weights::Weights;
use crate::text;

/// Locations that always satisfy the location factor regardless of where the
/// user works. The platform publishes these as "Remoto"; "Remote" is accepted
/// for data that arrived in English.
const REMOTE_SENTINELS: &[&str] = &["remoto", "remote"];

pub fn is_remote(location: &str) -> bool {
    REMOTE_SENTINELS.contains(&text::fold(location).as_str())
}

/// Per-factor values in 0.0–1.0, before weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorBreakdown {
    pub location: f64,
    pub interests: f64,
    pub personality: f64,
    pub time: f64,
    pub department: f64,
    /// Interest terms behind the `interests` ratio; feeds reason generation.
    pub matched_interests: Vec<String>,
}

impl FactorBreakdown {
    pub fn raw_score(&self, weights: &Weights) -> f64 {
        self.location * weights.location
            + self.interests * weights.interests
            + self.personality * weights.personality
            + self.time * weights.time
            + self.department * weights.department
    }
}

/// Deterministic five-factor scorer used when the AI path is unavailable.
/// Pure given its inputs; safe to call concurrently.
pub struct RuleBasedScorer {
    catalog: KeywordCatalog,
}

impl RuleBasedScorer {
    pub fn new(catalog: KeywordCatalog) -> Self {
        Self { catalog }
    }

    pub fn score(
        &self,
        profile: &UserProfile,
        assessment: Option<&AssessmentResult>,
        opportunity: &Opportunity,
    ) -> FactorBreakdown {
        let overlap = interest_overlap(&profile.interests, &opportunity.skills);

        FactorBreakdown {
            location: self.score_location(profile, opportunity),
            interests: overlap.ratio,
            personality: self.score_personality(assessment, opportunity),
            time: self.score_time(opportunity),
            department: self.score_department(profile, opportunity),
            matched_interests: overlap.matched,
        }
    }

    fn score_location(&self, profile: &UserProfile, opportunity: &Opportunity) -> f64 {
        if opportunity.location.is_empty() {
            return 0.0;
        }
        if opportunity.location == profile.location || is_remote(&opportunity.location) {
            1.0
        } else {
            0.0
        }
    }

    fn score_personality(
        &self,
        assessment: Option<&AssessmentResult>,
        opportunity: &Opportunity,
    ) -> f64 {
        // Neutral when the user never completed the assessment.
        let Some(assessment) = assessment else {
            return 0.5;
        };

        let keywords = self.catalog.strength_keywords(assessment.top_strength);
        if keywords.iter().any(|k| text_mentions(opportunity, k)) {
            0.8
        } else {
            0.4
        }
    }

    fn score_time(&self, opportunity: &Opportunity) -> f64 {
        match opportunity.duration {
            2..=8 => 1.0,
            1..=12 => 0.7,
            _ => 0.4,
        }
    }

    fn score_department(&self, profile: &UserProfile, opportunity: &Opportunity) -> f64 {
        let keywords = self.catalog.department_keywords(&profile.department);
        if keywords.iter().any(|k| text_mentions(opportunity, k)) {
            1.0
        } else {
            0.5
        }
    }
}

fn text_mentions(opportunity: &Opportunity, keyword: &str) -> bool {
    text::contains_folded(&opportunity.title, keyword)
        || text::contains_folded(&opportunity.description, keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TopStrength;

    fn base_profile() -> UserProfile {
        UserProfile {
            department: "ti".into(),
            location: "Lima".into(),
            interests: vec!["educación".into()],
            ..UserProfile::default()
        }
    }

    fn base_opportunity() -> Opportunity {
        Opportunity {
            id: "op-1".into(),
            title: "Mentoring escolar".into(),
            description: "Acompañamiento a estudiantes de secundaria".into(),
            location: "Lima".into(),
            duration: 4,
            skills: vec!["educacion".into(), "mentoring".into()],
            ..Opportunity::default()
        }
    }

    fn assessment(top_strength: TopStrength) -> AssessmentResult {
        AssessmentResult {
            top_strength,
            personality_profile: Default::default(),
            strength_distribution: Default::default(),
        }
    }

    fn scorer() -> RuleBasedScorer {
        RuleBasedScorer::new(KeywordCatalog::default())
    }

    #[test]
    fn exact_location_and_remote_score_full() {
        let scorer = scorer();
        let profile = base_profile();

        assert_eq!(scorer.score_location(&profile, &base_opportunity()), 1.0);

        let mut remote = base_opportunity();
        remote.location = "Remoto".into();
        assert_eq!(scorer.score_location(&profile, &remote), 1.0);

        let mut elsewhere = base_opportunity();
        elsewhere.location = "Cusco".into();
        assert_eq!(scorer.score_location(&profile, &elsewhere), 0.0);
    }

    #[test]
    fn remote_matches_for_users_anywhere() {
        let scorer = scorer();
        let mut profile = base_profile();
        profile.location = "Cusco".into();

        let mut remote = base_opportunity();
        remote.location = "Remoto".into();

        assert_eq!(scorer.score_location(&profile, &remote), 1.0);
        assert!(is_remote("remote"));
        assert!(!is_remote("Remoto (híbrido)"));
    }

    #[test]
    fn missing_location_contributes_nothing() {
        let scorer = scorer();
        let mut profile = base_profile();
        profile.location = String::new();

        let mut blank = base_opportunity();
        blank.location = String::new();

        assert_eq!(scorer.score_location(&profile, &blank), 0.0);
    }

    #[test]
    fn personality_is_neutral_without_assessment() {
        let scorer = scorer();
        assert_eq!(scorer.score_personality(None, &base_opportunity()), 0.5);
    }

    #[test]
    fn relationship_strength_hits_mentoring_title() {
        let scorer = scorer();
        let result = scorer.score_personality(
            Some(&assessment(TopStrength::Relationship)),
            &base_opportunity(),
        );
        assert_eq!(result, 0.8);
    }

    #[test]
    fn strength_without_keyword_hit_scores_low() {
        let scorer = scorer();
        let mut opportunity = base_opportunity();
        opportunity.title = "Limpieza de playas".into();
        opportunity.description = "Jornada ambiental".into();

        let result =
            scorer.score_personality(Some(&assessment(TopStrength::Execution)), &opportunity);
        assert_eq!(result, 0.4);
    }

    #[test]
    fn time_bands_match_commitment_ranges() {
        let scorer = scorer();
        let mut opportunity = base_opportunity();

        opportunity.duration = 2;
        assert_eq!(scorer.score_time(&opportunity), 1.0);
        opportunity.duration = 8;
        assert_eq!(scorer.score_time(&opportunity), 1.0);
        opportunity.duration = 1;
        assert_eq!(scorer.score_time(&opportunity), 0.7);
        opportunity.duration = 12;
        assert_eq!(scorer.score_time(&opportunity), 0.7);
        opportunity.duration = 20;
        assert_eq!(scorer.score_time(&opportunity), 0.4);
        opportunity.duration = 0;
        assert_eq!(scorer.score_time(&opportunity), 0.4);
    }

    #[test]
    fn department_keywords_raise_synergy() {
        let scorer = scorer();
        let mut profile = base_profile();
        profile.department = "finanzas".into();

        let mut opportunity = base_opportunity();
        opportunity.title = "Educación financiera para emprendedores".into();
        assert_eq!(scorer.score_department(&profile, &opportunity), 1.0);

        profile.department = "legal".into();
        assert_eq!(scorer.score_department(&profile, &opportunity), 0.5);
    }

    #[test]
    fn weighted_sum_reproduces_reference_case() {
        // Lima user, interest "educación", 4h local opportunity, no assessment:
        // 20 + 25 + 15 + 15 + 5 = 80.
        let scorer = scorer();
        let mut profile = base_profile();
        profile.department = "legal".into();

        let breakdown = scorer.score(&profile, None, &base_opportunity());

        assert_eq!(breakdown.location, 1.0);
        assert_eq!(breakdown.interests, 1.0);
        assert_eq!(breakdown.personality, 0.5);
        assert_eq!(breakdown.time, 1.0);
        assert_eq!(breakdown.department, 0.5);
        assert_eq!(breakdown.matched_interests, vec!["educación".to_string()]);

        let raw = breakdown.raw_score(&super::super::weights::FALLBACK_WEIGHTS);
        assert!((raw - 80.0).abs() < 1e-9);
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = scorer();
        let profile = base_profile();
        let opportunity = base_opportunity();
        let assessment = assessment(TopStrength::Thinking);

        let first = scorer.score(&profile, Some(&assessment), &opportunity);
        let second = scorer.score(&profile, Some(&assessment), &opportunity);

        assert_eq!(first, second);
    }
}
