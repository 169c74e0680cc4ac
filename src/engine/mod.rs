//! # Classification engine
//!
//! Maps a 16-answer sequence to exactly one persona.
//!
//! ## Pipeline
//!
//! ```text
//! answers[16] ─┬─ score_axes ──────► AxisScores ── SignKey ── CandidateTable::resolve
//!              │                                                   │
//!              └─ accumulate_tags ─► TagCounts                     ▼
//!                                       │              pool empty? ─── yes ──► euclidean_fallback
//!                                       │                   │ no                      │
//!                                       └──────────► select_character ◄── tied ───────┘
//!                                                           │
//!                                                           ▼
//!                                                      PersonaSlug
//! ```
//!
//! Every stage is a pure function over immutable registries, so a single
//! [`QuizEngine`] can serve any number of threads without locking.

pub mod answers;
pub mod axis;
pub mod error;
pub mod fallback;
pub mod pool;
pub mod quiz;
pub mod selector;
pub mod tags;

use std::sync::OnceLock;

pub use answers::validate_answers;
pub use axis::{score_axes, Axis, AxisScores, Leaning};
pub use error::QuizError;
pub use fallback::{euclidean_fallback, nearest_personas, FallbackMatch, Nearest};
pub use pool::{CandidateTable, SignKey};
pub use quiz::{Classification, QuizEngine, Resolution};
pub use selector::{primary_tag_score, select_character};
pub use tags::{accumulate_tags, Tag, TagCounts};

use crate::persona::PersonaSlug;

static BUILTIN_ENGINE: OnceLock<QuizEngine> = OnceLock::new();

/// Process-wide engine over the compiled-in registries.
pub fn builtin_engine() -> &'static QuizEngine {
    BUILTIN_ENGINE.get_or_init(QuizEngine::builtin)
}

/// Classify `answers` with the built-in registries.
pub fn get_result(answers: &[u8]) -> Result<PersonaSlug, QuizError> {
    builtin_engine().get_result(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_engine_is_shared() {
        assert!(std::ptr::eq(builtin_engine(), builtin_engine()));
    }

    #[test]
    fn test_get_result() {
        assert_eq!(get_result(&[0; 16]).unwrap(), PersonaSlug::Gatssn);
        assert!(get_result(&[]).is_err());
    }
}
