//! Nearest-persona fallback for sign patterns the candidate table does not cover.

use serde::Serialize;

use crate::engine::axis::AxisScores;
use crate::engine::selector::select_character;
use crate::engine::tags::TagCounts;
use crate::persona::{PersonaRegistry, PersonaSlug};

/// Personas closest to a point in axis space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nearest {
    /// Every persona at the minimum distance, in registry order.
    pub personas: Vec<PersonaSlug>,
    /// The minimum Euclidean distance.
    pub distance: f64,
}

/// Outcome of the fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackMatch {
    pub persona: PersonaSlug,
    pub distance: f64,
    /// Personas that shared the minimum distance (just `persona` when unique).
    pub tied: Vec<PersonaSlug>,
}

/// Collect every persona at minimum Euclidean distance from `scores`.
///
/// Ties are expected: persona points and scores are both integer lattice
/// points. Returns `None` only for an empty registry.
pub fn nearest_personas(scores: &AxisScores, personas: &PersonaRegistry) -> Option<Nearest> {
    let mut min_squared = i32::MAX;
    let mut nearest = Vec::new();

    for persona in personas.iter() {
        let squared = scores.squared_distance(&persona.axis_values);
        if squared < min_squared {
            min_squared = squared;
            nearest.clear();
            nearest.push(persona.slug);
        } else if squared == min_squared {
            nearest.push(persona.slug);
        }
    }

    if nearest.is_empty() {
        return None;
    }
    Some(Nearest {
        personas: nearest,
        distance: f64::from(min_squared).sqrt(),
    })
}

/// Pick the nearest persona, breaking distance ties by primary-tag score.
pub fn euclidean_fallback(
    scores: &AxisScores,
    personas: &PersonaRegistry,
    tags: &TagCounts,
) -> Option<FallbackMatch> {
    let nearest = nearest_personas(scores, personas)?;
    let persona = match nearest.personas.as_slice() {
        [only] => *only,
        tied => select_character(tied, personas, tags)?,
    };

    log::debug!(
        "Fallback for {:?}: {} at distance {:.3} (tied: {:?})",
        scores,
        persona,
        nearest.distance,
        nearest.personas
    );

    Some(FallbackMatch {
        persona,
        distance: nearest.distance,
        tied: nearest.personas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tags::Tag;
    use PersonaSlug::*;

    #[test]
    fn test_exact_persona_point_is_unique_match() {
        let personas = PersonaRegistry::builtin();
        for persona in personas.iter() {
            let m = euclidean_fallback(&persona.axis_values, &personas, &TagCounts::default())
                .unwrap();
            assert_eq!(m.persona, persona.slug);
            assert_eq!(m.distance, 0.0);
            assert_eq!(m.tied, vec![persona.slug]);
        }
    }

    #[test]
    fn test_uncovered_pattern_ties_in_registry_order() {
        let personas = PersonaRegistry::builtin();
        let nearest = nearest_personas(&AxisScores::new(1, 1, 1, -1), &personas).unwrap();
        assert_eq!(nearest.personas, vec![Jangseung, Dalgyal]);
        assert_eq!(nearest.distance, 2.0);
    }

    #[test]
    fn test_tie_resolved_by_primary_tag() {
        let personas = PersonaRegistry::builtin();
        let tags = TagCounts::from_pairs(&[(Tag::Governance, 1), (Tag::Design, 7)]);
        let m = euclidean_fallback(&AxisScores::new(1, 1, 1, -1), &personas, &tags).unwrap();
        // dalgyal's primary tag is not tracked, so it cannot beat jangseung.
        assert_eq!(m.persona, Jangseung);
        assert_eq!(m.tied, vec![Jangseung, Dalgyal]);
    }

    #[test]
    fn test_reachable_uncovered_pattern() {
        // (2, 2, 2, -2) is what answers [1,1,1,0,1,1,1,0] produce.
        let personas = PersonaRegistry::builtin();
        let nearest = nearest_personas(&AxisScores::new(2, 2, 2, -2), &personas).unwrap();
        assert_eq!(nearest.personas, vec![Jangseung, Dalgyal]);
        assert!((nearest.distance - 12f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_multi_way_tie_uses_tags() {
        let personas = PersonaRegistry::builtin();
        let scores = AxisScores::new(0, 0, -1, 0);
        let nearest = nearest_personas(&scores, &personas).unwrap();
        assert_eq!(nearest.personas, vec![Gatssn, Chonggak, Dokkaebi, Gumiho, Jeoseung]);
        assert!((nearest.distance - 3f64.sqrt()).abs() < 1e-12);

        let tags = TagCounts::from_pairs(&[(Tag::Automation, 4), (Tag::Immersion, 3)]);
        let m = euclidean_fallback(&scores, &personas, &tags).unwrap();
        assert_eq!(m.persona, Gumiho);

        let m = euclidean_fallback(&scores, &personas, &TagCounts::default()).unwrap();
        assert_eq!(m.persona, Gatssn);
    }

    #[test]
    fn test_unique_nearest_ignores_tags() {
        let personas = PersonaRegistry::builtin();
        let tags = TagCounts::from_pairs(&[(Tag::Testing, 4), (Tag::DebtCleanup, 4)]);
        let m = euclidean_fallback(&AxisScores::new(-2, -2, -2, -2), &personas, &tags).unwrap();
        assert_eq!(m.persona, Gatssn);
        assert_eq!(m.tied, vec![Gatssn]);
        assert_eq!(m.distance, 2.0);
    }

    #[test]
    fn test_empty_registry_yields_none() {
        let empty: PersonaRegistry = serde_yaml::from_str("personas: []").unwrap();
        assert!(nearest_personas(&AxisScores::default(), &empty).is_none());
        assert!(euclidean_fallback(&AxisScores::default(), &empty, &TagCounts::default()).is_none());
    }
}
