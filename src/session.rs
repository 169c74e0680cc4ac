//! In-memory quiz session: answers one question at a time and classifies
//! once the last question is answered.

use serde::Serialize;

use crate::engine::{Classification, QuizEngine, QuizError};
use crate::questions::Question;

/// Position in the quiz as shown to the quiz taker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 1-based number of the question on screen.
    pub current: usize,
    pub total: usize,
    /// `current / total` as a whole percentage, rounded half up.
    pub percent: u8,
}

impl Progress {
    fn new(current: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((current * 100 + total / 2) / total).min(100) as u8
        };
        Self {
            current,
            total,
            percent,
        }
    }
}

/// What happened after an answer was recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// More questions remain.
    Next(Progress),
    /// That was the last question.
    Complete(Classification),
}

/// A single quiz taker's run through the questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    engine: QuizEngine,
    answers: Vec<u8>,
    result: Option<Classification>,
}

impl QuizSession {
    pub fn new(engine: QuizEngine) -> Self {
        let capacity = engine.questions().len();
        Self {
            engine,
            answers: Vec::with_capacity(capacity),
            result: None,
        }
    }

    fn total(&self) -> usize {
        self.engine.questions().len()
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&Question> {
        if self.result.is_some() {
            return None;
        }
        self.engine.questions().get(self.answers.len())
    }

    pub fn progress(&self) -> Progress {
        let current = (self.answers.len() + 1).min(self.total());
        Progress::new(current, self.total())
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&Classification> {
        self.result.as_ref()
    }

    /// Record `option` for the current question.
    ///
    /// An option outside the current question's range is rejected and the
    /// session stays on the same question.
    pub fn answer(&mut self, option: u8) -> Result<Step, QuizError> {
        if self.result.is_some() {
            return Err(QuizError::SessionCompleted);
        }

        let position = self.answers.len();
        let options = self.engine.questions().option_count(position);
        if usize::from(option) >= options {
            return Err(QuizError::InvalidAnswerIndex {
                position,
                option: i64::from(option),
                options,
            });
        }
        self.answers.push(option);

        if self.answers.len() < self.total() {
            return Ok(Step::Next(self.progress()));
        }

        let classification = self.engine.classify(&self.answers)?;
        log::debug!(
            "Session complete: {} after {} answers",
            classification.persona,
            self.answers.len()
        );
        self.result = Some(classification.clone());
        Ok(Step::Complete(classification))
    }

    /// Return to the previous question, discarding its answer.
    ///
    /// Going back from a completed session reopens the last question.
    /// Returns `false` when already at the first question.
    pub fn back(&mut self) -> bool {
        self.result = None;
        self.answers.pop().is_some()
    }
}
