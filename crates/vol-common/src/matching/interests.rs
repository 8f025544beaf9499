use crate::text;

#[derive(Debug, Clone, PartialEq)]
pub struct InterestOverlap {
    /// User interest terms (original casing) that hit at least one skill.
    pub matched: Vec<String>,
    /// matched count over max(interest count, 1).
    pub ratio: f64,
}

/// A user interest matches a skill when either folded string contains the
/// other, so "educación" counts against a skill tagged "educacion".
pub fn interest_overlap(interests: &[String], skills: &[String]) -> InterestOverlap {
    let matched: Vec<String> = interests
        .iter()
        .filter(|interest| {
            skills
                .iter()
                .any(|skill| text::either_contains(interest, skill))
        })
        .cloned()
        .collect();

    let ratio = matched.len() as f64 / interests.len().max(1) as f64;

    InterestOverlap { matched, ratio }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn accented_interest_matches_plain_skill() {
        let overlap = interest_overlap(
            &strings(&["educación"]),
            &strings(&["educacion", "mentoring"]),
        );

        assert_eq!(overlap.matched, strings(&["educación"]));
        assert!((overlap.ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_is_over_interest_count() {
        let overlap = interest_overlap(
            &strings(&["educación", "deporte"]),
            &strings(&["educacion"]),
        );

        assert_eq!(overlap.matched.len(), 1);
        assert!((overlap.ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_interests_score_zero_without_dividing_by_zero() {
        let overlap = interest_overlap(&[], &strings(&["educacion"]));

        assert!(overlap.matched.is_empty());
        assert_eq!(overlap.ratio, 0.0);
    }

    #[test]
    fn containment_works_in_both_directions() {
        let overlap = interest_overlap(
            &strings(&["desarrollo de software"]),
            &strings(&["desarrollo"]),
        );
        assert_eq!(overlap.matched.len(), 1);

        let overlap = interest_overlap(
            &strings(&["redes"]),
            &strings(&["redes sociales y campañas"]),
        );
        assert_eq!(overlap.matched.len(), 1);
    }

    #[test]
    fn empty_skills_never_match() {
        let overlap = interest_overlap(&strings(&["educación"]), &[]);
        assert!(overlap.matched.is_empty());
        assert_eq!(overlap.ratio, 0.0);
    }
}
