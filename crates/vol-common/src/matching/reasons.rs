use crate::{Opportunity, OpportunityKind, UserProfile};

use super::scoring::is_remote;

const MAX_REASONS: usize = 3;

/// Build the user-facing justification list for a rule-based match.
/// Conditions are evaluated in a fixed priority order and the first three
/// that hold are kept, so the most concrete reasons (location, interests)
/// win over generic ones.
pub fn build_reasons(
    profile: &UserProfile,
    opportunity: &Opportunity,
    matched_interests: &[String],
    match_percentage: u8,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if !opportunity.location.is_empty() && opportunity.location == profile.location {
        reasons.push("Ubicación compatible con tu zona de trabajo".to_string());
    } else if is_remote(&opportunity.location) {
        reasons.push("Modalidad remota - participación flexible".to_string());
    }

    if !matched_interests.is_empty() {
        reasons.push(format!(
            "Alineado con tus intereses: {}",
            matched_interests.join(", ")
        ));
    }

    if (1..=4).contains(&opportunity.duration) {
        reasons.push("Compromiso de tiempo manejable".to_string());
    } else if (5..=8).contains(&opportunity.duration) {
        reasons.push("Duración ideal para desarrollar habilidades".to_string());
    }

    match opportunity.kind {
        OpportunityKind::Lab => {
            reasons.push("Proyecto de impacto rápido y medible".to_string());
        }
        OpportunityKind::Mision => {
            reasons.push("Oportunidad de desarrollo profesional a largo plazo".to_string());
        }
    }

    if match_percentage >= 90 {
        reasons.push("Coincidencia excepcional con tu perfil".to_string());
    } else if match_percentage >= 80 {
        reasons.push("Muy buena compatibilidad con tus fortalezas".to_string());
    } else if match_percentage >= 70 {
        reasons.push("Buena oportunidad de crecimiento personal".to_string());
    }

    reasons.truncate(MAX_REASONS);
    reasons
}
