//! Persona profiles and the persona registry.
//!
//! A profile carries only what the engine needs: the persona's reference
//! point in axis space and its primary tag, plus the synergy/tension
//! relationships shown next to a result. Names, descriptions and emoji live
//! in the presentation layer.
//!
//! # Example YAML
//!
//! ```yaml
//! personas:
//!   - slug: gatssn
//!     axis_values: { A: -1, B: -1, C: -1, D: -1 }
//!     primary_tag: design
//!     synergy: jeoseung
//!     tension: cheonyeo
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::axis::AxisScores;
use crate::engine::error::QuizError;

use super::slug::PersonaSlug;

/// Static description of one persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub slug: PersonaSlug,
    /// Reference point in axis space, each component in `[-2, 2]`.
    pub axis_values: AxisScores,
    /// Label of the tag that decides ties in this persona's favour.
    ///
    /// Labels that are not one of the eight tags are kept as-is and score 0.
    #[serde(default)]
    pub primary_tag: Option<String>,
    /// Persona that works well alongside this one.
    pub synergy: PersonaSlug,
    /// Persona this one tends to clash with.
    pub tension: PersonaSlug,
}

impl PersonaProfile {
    fn new(
        slug: PersonaSlug,
        axis_values: AxisScores,
        primary_tag: &str,
        synergy: PersonaSlug,
        tension: PersonaSlug,
    ) -> Self {
        Self {
            slug,
            axis_values,
            primary_tag: Some(primary_tag.to_string()),
            synergy,
            tension,
        }
    }
}

/// Immutable, ordered set of the ten persona profiles.
///
/// Iteration order is significant: the nearest-persona fallback breaks
/// distance ties in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaRegistry {
    personas: Vec<PersonaProfile>,
}

impl PersonaRegistry {
    /// The compiled-in personas.
    pub fn builtin() -> Self {
        use PersonaSlug::*;

        let personas = vec![
            PersonaProfile::new(Gatssn, AxisScores::new(-1, -1, -1, -1), "design", Jeoseung, Cheonyeo),
            PersonaProfile::new(Chonggak, AxisScores::new(-1, 1, -1, 1), "immersion", Gumiho, Jeoseung),
            PersonaProfile::new(Cheonyeo, AxisScores::new(-1, -1, 1, 1), "ux", Haetae, Gatssn),
            PersonaProfile::new(Dokkaebi, AxisScores::new(1, 1, -1, 1), "experiment", Mulgwisin, Haetae),
            PersonaProfile::new(Gumiho, AxisScores::new(1, -1, -1, 1), "automation", Chonggak, Jangseung),
            PersonaProfile::new(Haetae, AxisScores::new(-1, -1, 1, -1), "testing", Cheonyeo, Dokkaebi),
            PersonaProfile::new(Jangseung, AxisScores::new(-1, 1, 1, -1), "governance", Dalgyal, Gumiho),
            PersonaProfile::new(Jeoseung, AxisScores::new(1, -1, -1, -1), "debt_cleanup", Gatssn, Chonggak),
            PersonaProfile::new(Mulgwisin, AxisScores::new(-1, 1, 1, 1), "connection", Dokkaebi, Dalgyal),
            PersonaProfile::new(Dalgyal, AxisScores::new(1, -1, 1, -1), "abstraction", Jangseung, Mulgwisin),
        ];
        Self { personas }
    }

    /// Build a registry from explicit profiles, validating it.
    pub fn new(personas: Vec<PersonaProfile>) -> Result<Self, QuizError> {
        let registry = Self { personas };
        registry.validate()?;
        Ok(registry)
    }

    /// Parse and validate a YAML registry.
    pub fn from_yaml(yaml: &str) -> Result<Self, QuizError> {
        let registry: Self = serde_yaml::from_str(yaml)?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn get(&self, slug: PersonaSlug) -> Option<&PersonaProfile> {
        self.personas.iter().find(|p| p.slug == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonaProfile> {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Check that every persona appears exactly once with a valid reference point.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.personas.is_empty() {
            return Err(QuizError::malformed("persona registry is empty"));
        }

        let mut seen = HashSet::new();
        for persona in &self.personas {
            if !seen.insert(persona.slug) {
                return Err(QuizError::malformed(format!(
                    "persona '{}' is listed more than once",
                    persona.slug
                )));
            }
            if !persona.axis_values.in_bounds() {
                return Err(QuizError::malformed(format!(
                    "persona '{}' has axis values outside [-2, 2]: {:?}",
                    persona.slug, persona.axis_values
                )));
            }
            if persona.synergy == persona.slug || persona.tension == persona.slug {
                return Err(QuizError::malformed(format!(
                    "persona '{}' cannot be its own synergy or tension",
                    persona.slug
                )));
            }
        }

        if let Some(missing) = PersonaSlug::ALL.iter().find(|slug| !seen.contains(*slug)) {
            return Err(QuizError::malformed(format!(
                "persona '{}' is missing from the registry",
                missing
            )));
        }

        Ok(())
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tags::Tag;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = PersonaRegistry::builtin();
        assert_eq!(registry.len(), PersonaSlug::COUNT);
        registry.validate().unwrap();
    }

    #[test]
    fn test_builtin_order_matches_slug_order() {
        let order: Vec<PersonaSlug> = PersonaRegistry::builtin().iter().map(|p| p.slug).collect();
        assert_eq!(order, PersonaSlug::ALL.to_vec());
    }

    #[test]
    fn test_primary_tags() {
        let registry = PersonaRegistry::builtin();
        let tag_of = |slug| registry.get(slug).unwrap().primary_tag.clone().unwrap();
        assert_eq!(tag_of(PersonaSlug::Chonggak), Tag::Immersion.as_str());
        assert_eq!(tag_of(PersonaSlug::Jeoseung), Tag::DebtCleanup.as_str());
        // Not one of the eight tracked tags.
        assert!(tag_of(PersonaSlug::Dokkaebi).parse::<Tag>().is_err());
        assert!(tag_of(PersonaSlug::Dalgyal).parse::<Tag>().is_err());
    }

    #[test]
    fn test_relationships_are_symmetric_for_synergy_pairs() {
        let registry = PersonaRegistry::builtin();
        let chonggak = registry.get(PersonaSlug::Chonggak).unwrap();
        let gumiho = registry.get(PersonaSlug::Gumiho).unwrap();
        assert_eq!(chonggak.synergy, PersonaSlug::Gumiho);
        assert_eq!(gumiho.synergy, PersonaSlug::Chonggak);
    }

    #[test]
    fn test_validate_rejects_duplicate() {
        let mut personas: Vec<PersonaProfile> = PersonaRegistry::builtin().iter().cloned().collect();
        personas[9] = personas[0].clone();
        let err = PersonaRegistry::new(personas).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(
            PersonaRegistry::new(Vec::new()),
            Err(QuizError::MalformedRegistry(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_axis() {
        let mut personas: Vec<PersonaProfile> = PersonaRegistry::builtin().iter().cloned().collect();
        personas[3].axis_values.c = 3;
        assert!(PersonaRegistry::new(personas).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_persona() {
        let mut personas: Vec<PersonaProfile> = PersonaRegistry::builtin().iter().cloned().collect();
        personas.retain(|p| p.slug != PersonaSlug::Haetae);
        let err = PersonaRegistry::new(personas).unwrap_err();
        assert!(err.to_string().contains("haetae"));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = serde_yaml::to_string(&PersonaRegistry::builtin()).unwrap();
        assert_eq!(PersonaRegistry::from_yaml(&yaml).unwrap(), PersonaRegistry::builtin());
    }

    #[test]
    fn test_from_yaml_primary_tag_is_optional() {
        let mut yaml = String::from("personas:\n");
        for persona in PersonaRegistry::builtin().iter() {
            yaml.push_str(&format!(
                "  - slug: {}\n    axis_values: {{ A: {}, B: {}, C: {}, D: {} }}\n    synergy: {}\n    tension: {}\n",
                persona.slug,
                persona.axis_values.a,
                persona.axis_values.b,
                persona.axis_values.c,
                persona.axis_values.d,
                persona.synergy,
                persona.tension,
            ));
        }
        let registry = PersonaRegistry::from_yaml(&yaml).unwrap();
        assert!(registry.iter().all(|p| p.primary_tag.is_none()));
    }
}
