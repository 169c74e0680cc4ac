//! The classification pipeline: answers in, one persona out.

use std::sync::Arc;

use serde::Serialize;

use crate::engine::axis::{score_axes, AxisScores};
use crate::engine::error::QuizError;
use crate::engine::fallback::euclidean_fallback;
use crate::engine::pool::{CandidateTable, SignKey};
use crate::engine::selector::select_character;
use crate::engine::tags::{accumulate_tags, TagCounts};
use crate::persona::{PersonaRegistry, PersonaSlug};
use crate::questions::QuestionRegistry;

/// How the persona was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum Resolution {
    /// The sign pattern had a table entry.
    Direct,
    /// The sign pattern was not covered; the nearest persona was used.
    Fallback {
        distance: f64,
        /// Personas at the minimum distance, in registry order.
        tied: Vec<PersonaSlug>,
    },
}

/// Full trace of one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub persona: PersonaSlug,
    pub axis_scores: AxisScores,
    pub tag_counts: TagCounts,
    pub sign_key: SignKey,
    /// Candidate pool from the table (empty when the fallback ran).
    pub candidates: Vec<PersonaSlug>,
    pub resolution: Resolution,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        matches!(self.resolution, Resolution::Fallback { .. })
    }
}

/// Questions, personas and candidate table bundled for classification.
///
/// Cloning is cheap; the registries are shared behind `Arc`.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Arc<QuestionRegistry>,
    personas: Arc<PersonaRegistry>,
    table: Arc<CandidateTable>,
}

impl QuizEngine {
    /// Assemble an engine, validating every registry.
    pub fn new(
        questions: QuestionRegistry,
        personas: PersonaRegistry,
        table: CandidateTable,
    ) -> Result<Self, QuizError> {
        let engine = Self {
            questions: Arc::new(questions),
            personas: Arc::new(personas),
            table: Arc::new(table),
        };
        engine.validate()?;
        Ok(engine)
    }

    /// Engine over the compiled-in registries.
    pub fn builtin() -> Self {
        Self {
            questions: Arc::new(QuestionRegistry::builtin()),
            personas: Arc::new(PersonaRegistry::builtin()),
            table: Arc::new(CandidateTable::builtin()),
        }
    }

    /// Validate each registry and the references between them.
    pub fn validate(&self) -> Result<(), QuizError> {
        self.questions.validate()?;
        self.personas.validate()?;
        self.table.validate()?;

        for (key, pool) in self.table.iter() {
            if let Some(slug) = pool.iter().find(|slug| self.personas.get(**slug).is_none()) {
                return Err(QuizError::malformed(format!(
                    "candidate '{}' for '{}' has no persona profile",
                    slug, key
                )));
            }
        }
        Ok(())
    }

    pub fn questions(&self) -> &QuestionRegistry {
        &self.questions
    }

    pub fn personas(&self) -> &PersonaRegistry {
        &self.personas
    }

    pub fn candidate_table(&self) -> &CandidateTable {
        &self.table
    }

    /// Classify a full answer sequence and keep the intermediate results.
    pub fn classify(&self, answers: &[u8]) -> Result<Classification, QuizError> {
        let axis_scores = score_axes(&self.questions, answers)?;
        let tag_counts = accumulate_tags(&self.questions, answers)?;
        let sign_key = SignKey::from_scores(&axis_scores);
        let candidates = self.table.get(sign_key).to_vec();

        let (persona, resolution) = if candidates.is_empty() {
            log::debug!("No candidates for {}, using nearest persona", sign_key);
            let found = euclidean_fallback(&axis_scores, &self.personas, &tag_counts)
                .ok_or_else(|| QuizError::malformed("persona registry is empty"))?;
            (
                found.persona,
                Resolution::Fallback {
                    distance: found.distance,
                    tied: found.tied,
                },
            )
        } else {
            let persona = select_character(&candidates, &self.personas, &tag_counts)
                .ok_or_else(|| {
                    QuizError::malformed(format!("empty candidate list for '{}'", sign_key))
                })?;
            (persona, Resolution::Direct)
        };

        log::debug!("Classified {:?} as {} via {}", axis_scores, persona, sign_key);

        Ok(Classification {
            persona,
            axis_scores,
            tag_counts,
            sign_key,
            candidates,
            resolution,
        })
    }

    /// Classify a full answer sequence to a persona slug.
    pub fn get_result(&self, answers: &[u8]) -> Result<PersonaSlug, QuizError> {
        self.classify(answers).map(|c| c.persona)
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tags::Tag;
    use PersonaSlug::*;

    fn answers(axis_part: [u8; 8], tag_part: [u8; 8]) -> Vec<u8> {
        axis_part.iter().chain(tag_part.iter()).copied().collect()
    }

    #[test]
    fn test_builtin_engine_validates() {
        QuizEngine::builtin().validate().unwrap();
    }

    #[test]
    fn test_all_zeros_is_gatssn() {
        let c = QuizEngine::builtin().classify(&[0; 16]).unwrap();
        assert_eq!(c.axis_scores, AxisScores::new(-2, -2, -2, -2));
        assert_eq!(c.sign_key.to_string(), "-1,-1,-1,-1");
        assert_eq!(c.candidates, vec![Gatssn]);
        assert_eq!(c.persona, Gatssn);
        assert_eq!(c.resolution, Resolution::Direct);
    }

    #[test]
    fn test_dokkaebi_pattern() {
        let engine = QuizEngine::builtin();
        let c = engine.classify(&answers([1, 1, 0, 1, 1, 1, 0, 1], [0; 8])).unwrap();
        assert_eq!(c.axis_scores, AxisScores::new(2, 2, -2, 2));
        assert_eq!(c.persona, Dokkaebi);
    }

    #[test]
    fn test_multi_candidate_pool_uses_primary_tag() {
        let c = QuizEngine::builtin()
            .classify(&answers([0, 1, 0, 1, 0, 1, 0, 1], [3; 8]))
            .unwrap();
        assert_eq!(c.candidates, vec![Chonggak, Gumiho]);
        assert_eq!(c.tag_counts.get(Tag::Immersion), 4);
        assert_eq!(c.tag_counts.get(Tag::Automation), 0);
        assert_eq!(c.persona, Chonggak);
        assert!(!c.is_fallback());
    }

    #[test]
    fn test_gumiho_wins_with_automation() {
        // Every second-half tag question answered "automation".
        let c = QuizEngine::builtin()
            .classify(&answers([0, 1, 0, 1, 0, 1, 0, 1], [0; 8]))
            .unwrap();
        assert_eq!(c.tag_counts.get(Tag::Design), 4);
        assert_eq!(c.tag_counts.get(Tag::Automation), 4);
        // chonggak's immersion count is 0.
        assert_eq!(c.persona, Gumiho);
    }

    #[test]
    fn test_uncovered_pattern_uses_fallback() {
        let c = QuizEngine::builtin()
            .classify(&answers([1, 1, 1, 0, 1, 1, 1, 0], [0; 8]))
            .unwrap();
        assert_eq!(c.axis_scores, AxisScores::new(2, 2, 2, -2));
        assert!(c.candidates.is_empty());
        assert_eq!(c.persona, Jangseung);
        match c.resolution {
            Resolution::Fallback { distance, tied } => {
                assert!((distance - 12f64.sqrt()).abs() < 1e-12);
                assert_eq!(tied, vec![Jangseung, Dalgyal]);
            }
            Resolution::Direct => panic!("expected fallback"),
        }
    }

    #[test]
    fn test_neutral_everywhere() {
        // 0 + 1 per axis gives a zero score on every axis.
        let c = QuizEngine::builtin()
            .classify(&answers([0, 0, 0, 0, 1, 1, 1, 1], [2; 8]))
            .unwrap();
        assert_eq!(c.sign_key.to_string(), "0,0,0,0");
        assert_eq!(c.candidates, vec![Gatssn, Dalgyal, Haetae]);
        // debt_cleanup 4 and testing 4: only haetae scores.
        assert_eq!(c.persona, Haetae);
    }

    #[test]
    fn test_get_result_propagates_errors() {
        let engine = QuizEngine::builtin();
        assert!(matches!(
            engine.get_result(&[0; 8]),
            Err(QuizError::AnswerCount { .. })
        ));
        let mut bad = vec![0u8; 16];
        bad[12] = 4;
        assert!(matches!(
            engine.get_result(&bad),
            Err(QuizError::InvalidAnswerIndex { position: 12, .. })
        ));
    }

    #[test]
    fn test_classification_serializes() {
        let c = QuizEngine::builtin().classify(&[0; 16]).unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["persona"], "gatssn");
        assert_eq!(json["sign_key"], "-1,-1,-1,-1");
        assert_eq!(json["axis_scores"]["A"], -2);
        assert_eq!(json["tag_counts"]["design"], 4);
        assert_eq!(json["resolution"]["path"], "direct");
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = QuizEngine::builtin();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.get_result(&[0; 16]).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Gatssn);
        }
    }
}
