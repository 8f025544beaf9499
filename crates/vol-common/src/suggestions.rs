use crate::TopStrength;

/// Curated activity ideas per dominant strength. Static content served next
/// to the scored matches so the dashboard always has something to show.
pub fn strength_suggestions(strength: TopStrength) -> &'static [&'static str] {
    match strength {
        TopStrength::Execution => &[
            "Coordinación de eventos benéficos",
            "Gestión de proyectos comunitarios",
            "Organización de campañas de donación",
            "Supervisión de construcción de infraestructura social",
        ],
        TopStrength::Relationship => &[
            "Mentoría a jóvenes emprendedores",
            "Facilitación de talleres grupales",
            "Acompañamiento a adultos mayores",
            "Mediación y resolución de conflictos comunitarios",
        ],
        TopStrength::Strategic => &[
            "Desarrollo de programas de sostenibilidad",
            "Planificación estratégica para ONGs",
            "Consultoría en transformación digital",
            "Diseño de campañas de concientización social",
        ],
        TopStrength::Thinking => &[
            "Investigación de problemáticas sociales",
            "Análisis de impacto de programas",
            "Capacitación en educación financiera",
            "Evaluación de necesidades comunitarias",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_strength_has_four_suggestions() {
        for strength in [
            TopStrength::Execution,
            TopStrength::Relationship,
            TopStrength::Strategic,
            TopStrength::Thinking,
        ] {
            assert_eq!(strength_suggestions(strength).len(), 4);
        }
    }

    #[test]
    fn relationship_leads_with_mentoring() {
        assert_eq!(
            strength_suggestions(TopStrength::Relationship)[0],
            "Mentoría a jóvenes emprendedores"
        );
    }
}
