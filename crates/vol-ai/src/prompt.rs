//! Spanish-language prompts for the chat-completions API. Both builders end
//! with an instruction to answer in bare JSON so the `json_object` response
//! format has something to hold on to.

use vol_common::insights::ImpactSnapshot;
use vol_common::{AssessmentResult, Opportunity, UserProfile};

pub const MATCHING_SYSTEM_PROMPT: &str = "Eres un experto en recursos humanos y voluntariado \
     corporativo especializado en matching personalizado.";

pub const IMPACT_SYSTEM_PROMPT: &str = "Eres un analista de impacto social especializado en \
     programas de voluntariado corporativo.";

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

pub fn matching_prompt(
    profile: &UserProfile,
    assessment: Option<&AssessmentResult>,
    opportunities: &[Opportunity],
) -> String {
    let top_strength = assessment
        .map(|a| a.top_strength.as_ref().to_string())
        .unwrap_or_else(|| "No evaluado".into());
    let personality_profile = assessment
        .and_then(|a| serde_json::to_string(&a.personality_profile).ok())
        .unwrap_or_else(|| "{}".into());

    let mut prompt = String::from(
        "Eres un experto en matching de voluntariado corporativo. Analiza el perfil del usuario \
         y las oportunidades disponibles para generar recomendaciones personalizadas.\n\n",
    );

    prompt.push_str(&format!(
        "Perfil del Usuario:\n\
         - Departamento: {}\n\
         - Ubicación: {}\n\
         - Intereses: {}\n\
         - Fortaleza principal: {}\n\
         - Perfil de personalidad: {}\n\n",
        profile.department,
        profile.location,
        join_or(&profile.interests, "No especificados"),
        top_strength,
        personality_profile,
    ));

    prompt.push_str("Oportunidades Disponibles:\n");
    for opportunity in opportunities {
        prompt.push_str(&format!(
            "- ID: {}\n\
             - Título: {}\n\
             - Tipo: {}\n\
             - Ubicación: {}\n\
             - Duración: {} horas\n\
             - Habilidades: {}\n\
             - ODS: {}\n\n",
            opportunity.id,
            opportunity.title,
            opportunity.kind.as_ref(),
            opportunity.location,
            opportunity.duration,
            join_or(&opportunity.skills, "No especificadas"),
            join_or(&opportunity.sdgs, "No especificados"),
        ));
    }

    prompt.push_str(
        r#"Genera recomendaciones en JSON con el siguiente formato:
{
  "recommendations": [
    {
      "opportunityId": "string",
      "matchPercentage": number,
      "reasons": ["string"],
      "skillAlignment": number,
      "interestAlignment": number,
      "personalityAlignment": number
    }
  ],
  "insights": {
    "strongMatches": ["string"],
    "developmentOpportunities": ["string"],
    "suggestedSkills": ["string"]
  }
}

Criterios de matching:
1. Alineación con fortalezas de personalidad (30%)
2. Coincidencia de intereses (25%)
3. Compatibilidad de ubicación (20%)
4. Habilidades requeridas vs disponibles (15%)
5. Tipo de compromiso temporal (10%)

Responde únicamente con JSON válido.
"#,
    );

    prompt
}

pub fn impact_prompt(snapshot: &ImpactSnapshot) -> String {
    let mut prompt = String::from(
        "Analiza las métricas de impacto del programa de voluntariado corporativo y genera \
         insights.\n\nParticipaciones:\n",
    );

    for participation in &snapshot.participations {
        let rating = participation
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "No evaluado".into());
        prompt.push_str(&format!(
            "- Usuario: {}\n\
             - Proyecto: {}\n\
             - Horas: {}\n\
             - Estado: {}\n\
             - Rating: {}\n\n",
            participation.user_id,
            participation.opportunity_id,
            participation.hours_completed,
            participation.status,
            rating,
        ));
    }

    prompt.push_str("Proyectos:\n");
    for opportunity in &snapshot.opportunities {
        prompt.push_str(&format!(
            "- ID: {}\n\
             - Título: {}\n\
             - Tipo: {}\n\
             - Voluntarios actuales: {}\n\
             - ODS: {}\n\n",
            opportunity.id,
            opportunity.title,
            opportunity.kind.as_ref(),
            opportunity.current_volunteers.unwrap_or(0),
            join_or(&opportunity.sdgs, "No especificados"),
        ));
    }

    prompt.push_str(
        r#"Genera un análisis en JSON con:
{
  "overallMetrics": {
    "totalHours": number,
    "averageRating": number,
    "completionRate": number,
    "participationTrend": "increasing|stable|decreasing"
  },
  "sdgImpact": [
    {
      "sdg": "string",
      "projects": number,
      "hours": number,
      "participants": number
    }
  ],
  "insights": [
    "string"
  ],
  "recommendations": [
    "string"
  ]
}

Responde únicamente con JSON válido.
"#,
    );

    prompt
}
