use std::collections::HashMap;

use crate::TopStrength;
use crate::text;

/// Strength → keywords used by personality scoring. Keywords are matched as
/// folded substrings of the opportunity title/description.
const STRENGTH_TABLE: &[(TopStrength, &[&str])] = &[
    (TopStrength::Execution, &["coordinacion", "gestion", "organizacion"]),
    (TopStrength::Relationship, &["mentoring", "facilitacion", "trabajo-grupal"]),
    (TopStrength::Strategic, &["desarrollo", "planificacion", "consultoria"]),
    (TopStrength::Thinking, &["investigacion", "analisis", "educacion"]),
];

/// Department → keywords used by the synergy factor. An unknown department
/// maps to no keywords and therefore a neutral score.
const DEPARTMENT_TABLE: &[(&str, &[&str])] = &[
    ("finanzas", &["financiera", "economia", "gestion"]),
    ("marketing", &["comunicacion", "redes", "campana"]),
    ("ti", &["tecnologia", "programacion", "digital"]),
    ("rrhh", &["capacitacion", "desarrollo", "recursos"]),
    ("operaciones", &["logistica", "coordinacion", "procesos"]),
];

/// Read-only keyword configuration injected into the engine at construction,
/// so tests can swap the production tables for fixtures.
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    strength_keywords: HashMap<TopStrength, Vec<String>>,
    department_keywords: HashMap<String, Vec<String>>,
}

impl KeywordCatalog {
    /// Department names are folded on insert and on lookup, so the catalog is
    /// insensitive to casing and accents in profile data.
    pub fn new(
        strength_keywords: HashMap<TopStrength, Vec<String>>,
        department_keywords: HashMap<String, Vec<String>>,
    ) -> Self {
        let department_keywords = department_keywords
            .into_iter()
            .map(|(department, keywords)| (text::fold(&department), keywords))
            .collect();

        Self {
            strength_keywords,
            department_keywords,
        }
    }

    pub fn strength_keywords(&self, strength: TopStrength) -> &[String] {
        self.strength_keywords
            .get(&strength)
            .map(|keywords| keywords.as_slice())
            .unwrap_or(&[])
    }

    pub fn department_keywords(&self, department: &str) -> &[String] {
        self.department_keywords
            .get(&text::fold(department))
            .map(|keywords| keywords.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        let strength_keywords = STRENGTH_TABLE
            .iter()
            .map(|(strength, keywords)| {
                (*strength, keywords.iter().map(|k| k.to_string()).collect())
            })
            .collect();

        let department_keywords = DEPARTMENT_TABLE
            .iter()
            .map(|(department, keywords)| {
                (
                    department.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect();

        Self::new(strength_keywords, department_keywords)
    }
}
