//! Question registry — the 16 fixed quiz questions and the effect of each option.
//!
//! Questions 1–8 are axis questions: two options, each pushing one axis by
//! −1 or +1. Questions 9–16 are tag questions: four options, each naming one
//! of the eight tags. Question wording lives in the presentation layer; the
//! registry only carries what the engine needs to score an answer.
//!
//! The built-in registry is compiled in. A YAML override can be loaded with
//! [`QuestionRegistry::from_yaml`]:
//!
//! ```yaml
//! questions:
//!   - id: 1
//!     options:
//!       - { axis: A, value: -1 }
//!       - { axis: A, value: 1 }
//!   - id: 9
//!     options:
//!       - { tag: design }
//!       - { tag: ux }
//!       - { tag: debt_cleanup }
//!       - { tag: immersion }
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::axis::Axis;
use crate::engine::error::QuizError;
use crate::engine::tags::Tag;

/// Number of questions in a quiz.
pub const QUESTION_COUNT: usize = 16;
/// Questions `0..AXIS_QUESTION_COUNT` are axis questions; the rest are tag questions.
pub const AXIS_QUESTION_COUNT: usize = 8;
/// Options per axis question.
pub const AXIS_OPTION_COUNT: usize = 2;
/// Options per tag question.
pub const TAG_OPTION_COUNT: usize = 4;

/// What selecting an option does to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionEffect {
    /// Adds `value` (−1 or +1) to `axis`.
    Axis { axis: Axis, value: i8 },
    /// Adds one point to `tag`.
    Tag { tag: Tag },
}

/// One quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based question number.
    pub id: u8,
    /// Option effects in display order; the answer value is an index into this list.
    pub options: Vec<OptionEffect>,
}

impl Question {
    fn axis(id: u8, axis: Axis) -> Self {
        Self {
            id,
            options: vec![
                OptionEffect::Axis { axis, value: -1 },
                OptionEffect::Axis { axis, value: 1 },
            ],
        }
    }

    fn tags(id: u8, tags: [Tag; TAG_OPTION_COUNT]) -> Self {
        Self {
            id,
            options: tags.iter().map(|&tag| OptionEffect::Tag { tag }).collect(),
        }
    }

    /// The axis this question scores, if it is an axis question.
    pub fn axis_of(&self) -> Option<Axis> {
        self.options.iter().find_map(|effect| match effect {
            OptionEffect::Axis { axis, .. } => Some(*axis),
            OptionEffect::Tag { .. } => None,
        })
    }
}

/// Immutable, ordered set of the 16 quiz questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRegistry {
    questions: Vec<Question>,
}

impl QuestionRegistry {
    /// The compiled-in question set.
    pub fn builtin() -> Self {
        const FIRST_HALF: [Tag; TAG_OPTION_COUNT] =
            [Tag::Design, Tag::Ux, Tag::DebtCleanup, Tag::Immersion];
        const SECOND_HALF: [Tag; TAG_OPTION_COUNT] =
            [Tag::Automation, Tag::Connection, Tag::Testing, Tag::Governance];

        let mut questions = Vec::with_capacity(QUESTION_COUNT);
        // A, B, C, D twice over: A = Q1 + Q5, B = Q2 + Q6, ...
        for (i, axis) in Axis::ALL.iter().chain(Axis::ALL.iter()).enumerate() {
            questions.push(Question::axis(i as u8 + 1, *axis));
        }
        for i in AXIS_QUESTION_COUNT..QUESTION_COUNT {
            let tags = if i % 2 == 0 { FIRST_HALF } else { SECOND_HALF };
            questions.push(Question::tags(i as u8 + 1, tags));
        }
        Self { questions }
    }

    /// Build a registry from explicit questions, validating its shape.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        let registry = Self { questions };
        registry.validate()?;
        Ok(registry)
    }

    /// Parse and validate a YAML registry.
    pub fn from_yaml(yaml: &str) -> Result<Self, QuizError> {
        let registry: Self = serde_yaml::from_str(yaml)?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at a 0-based position.
    pub fn get(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Number of options of the question at `position` (0 if there is none).
    pub fn option_count(&self, position: usize) -> usize {
        self.get(position).map_or(0, |q| q.options.len())
    }

    /// Reject an answer sequence that does not hold one answer per question.
    pub fn check_answer_count(&self, answers: &[u8]) -> Result<(), QuizError> {
        if answers.len() != self.len() {
            return Err(QuizError::AnswerCount {
                expected: self.len(),
                actual: answers.len(),
            });
        }
        Ok(())
    }

    /// Effect of the option chosen at `position`.
    pub fn selected(&self, position: usize, answers: &[u8]) -> Result<OptionEffect, QuizError> {
        let question = self.get(position).ok_or_else(|| {
            QuizError::malformed(format!("no question at position {}", position))
        })?;
        let option = *answers.get(position).ok_or(QuizError::AnswerCount {
            expected: self.len(),
            actual: answers.len(),
        })?;
        question
            .options
            .get(option as usize)
            .copied()
            .ok_or(QuizError::InvalidAnswerIndex {
                position,
                option: i64::from(option),
                options: question.options.len(),
            })
    }

    /// Check the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.len() != QUESTION_COUNT {
            return Err(QuizError::malformed(format!(
                "expected {} questions, found {}",
                QUESTION_COUNT,
                self.questions.len()
            )));
        }

        let mut axis_questions = [0usize; Axis::COUNT];
        let mut tag_options = [0usize; Tag::COUNT];

        for (position, question) in self.questions.iter().enumerate() {
            if usize::from(question.id) != position + 1 {
                return Err(QuizError::malformed(format!(
                    "question at position {} has id {}, expected {}",
                    position,
                    question.id,
                    position + 1
                )));
            }

            if position < AXIS_QUESTION_COUNT {
                if question.options.len() != AXIS_OPTION_COUNT {
                    return Err(QuizError::malformed(format!(
                        "axis question {} must have {} options, found {}",
                        question.id,
                        AXIS_OPTION_COUNT,
                        question.options.len()
                    )));
                }
                // A, B, C, D in order, then again.
                let axis = Axis::ALL[position % Axis::COUNT];
                if question.axis_of() != Some(axis) {
                    return Err(QuizError::malformed(format!(
                        "question {} must score axis {}",
                        question.id, axis
                    )));
                }
                let mut values = [0i8; AXIS_OPTION_COUNT];
                for (slot, effect) in values.iter_mut().zip(&question.options) {
                    match effect {
                        OptionEffect::Axis { axis: a, value }
                            if *a == axis && matches!(*value, -1 | 1) =>
                        {
                            *slot = *value
                        }
                        other => {
                            return Err(QuizError::malformed(format!(
                                "question {} option {:?} must move axis {} by -1 or +1",
                                question.id, other, axis
                            )))
                        }
                    }
                }
                if values[0] == values[1] {
                    return Err(QuizError::malformed(format!(
                        "question {} needs one -1 and one +1 option on axis {}",
                        question.id, axis
                    )));
                }
                axis_questions[axis.index()] += 1;
            } else {
                if question.options.len() != TAG_OPTION_COUNT {
                    return Err(QuizError::malformed(format!(
                        "tag question {} must have {} options, found {}",
                        question.id,
                        TAG_OPTION_COUNT,
                        question.options.len()
                    )));
                }
                for effect in &question.options {
                    match effect {
                        OptionEffect::Tag { tag } => tag_options[tag.index()] += 1,
                        OptionEffect::Axis { .. } => {
                            return Err(QuizError::malformed(format!(
                                "tag question {} carries an axis effect",
                                question.id
                            )))
                        }
                    }
                }
            }
        }

        let per_axis = AXIS_QUESTION_COUNT / Axis::COUNT;
        for axis in Axis::ALL {
            if axis_questions[axis.index()] != per_axis {
                return Err(QuizError::malformed(format!(
                    "axis {} is scored by {} questions, expected {}",
                    axis,
                    axis_questions[axis.index()],
                    per_axis
                )));
            }
        }

        let per_tag = (QUESTION_COUNT - AXIS_QUESTION_COUNT) * TAG_OPTION_COUNT / Tag::COUNT;
        for tag in Tag::ALL {
            if tag_options[tag.index()] != per_tag {
                return Err(QuizError::malformed(format!(
                    "tag '{}' appears {} times, expected {}",
                    tag,
                    tag_options[tag.index()],
                    per_tag
                )));
            }
        }

        Ok(())
    }
}

impl Default for QuestionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
