//! Axis scoring from the first eight answers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::error::QuizError;
use crate::questions::{OptionEffect, QuestionRegistry, AXIS_QUESTION_COUNT};

/// Lowest and highest score an axis can take.
pub const AXIS_MIN: i8 = -2;
pub const AXIS_MAX: i8 = 2;

/// The four bipolar dimensions a quiz taker is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    /// stability (−) ↔ experiment (+)
    A,
    /// structure (−) ↔ improvisation (+)
    B,
    /// individual (−) ↔ collaboration (+)
    C,
    /// quality (−) ↔ speed (+)
    D,
}

impl Axis {
    pub const COUNT: usize = 4;

    /// Axes in key order.
    pub const ALL: [Axis; Axis::COUNT] = [Axis::A, Axis::B, Axis::C, Axis::D];

    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Labels of the negative and positive pole.
    pub fn poles(self) -> (&'static str, &'static str) {
        match self {
            Self::A => ("stability", "experiment"),
            Self::B => ("structure", "improvisation"),
            Self::C => ("individual", "collaboration"),
            Self::D => ("quality", "speed"),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
        }
    }
}

/// Which pole of an axis a score falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    Negative,
    Neutral,
    Positive,
}

impl Leaning {
    fn of(value: i8) -> Self {
        match value.signum() {
            -1 => Self::Negative,
            0 => Self::Neutral,
            _ => Self::Positive,
        }
    }
}

/// A point in 4-D axis space.
///
/// Used both for a quiz taker's scores and for a persona's reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxisScores {
    #[serde(rename = "A")]
    pub a: i8,
    #[serde(rename = "B")]
    pub b: i8,
    #[serde(rename = "C")]
    pub c: i8,
    #[serde(rename = "D")]
    pub d: i8,
}

impl AxisScores {
    pub const fn new(a: i8, b: i8, c: i8, d: i8) -> Self {
        Self { a, b, c, d }
    }

    pub fn get(&self, axis: Axis) -> i8 {
        match axis {
            Axis::A => self.a,
            Axis::B => self.b,
            Axis::C => self.c,
            Axis::D => self.d,
        }
    }

    fn add(&mut self, axis: Axis, value: i8) {
        let slot = match axis {
            Axis::A => &mut self.a,
            Axis::B => &mut self.b,
            Axis::C => &mut self.c,
            Axis::D => &mut self.d,
        };
        *slot = slot.saturating_add(value);
    }

    /// Scores in A, B, C, D order.
    pub fn to_array(&self) -> [i8; Axis::COUNT] {
        [self.a, self.b, self.c, self.d]
    }

    /// Sign of each axis (−1, 0, +1) in A, B, C, D order.
    pub fn signs(&self) -> [i8; Axis::COUNT] {
        self.to_array().map(i8::signum)
    }

    pub fn leaning(&self, axis: Axis) -> Leaning {
        Leaning::of(self.get(axis))
    }

    /// Whether every axis lies in `[AXIS_MIN, AXIS_MAX]`.
    pub fn in_bounds(&self) -> bool {
        self.to_array()
            .iter()
            .all(|v| (AXIS_MIN..=AXIS_MAX).contains(v))
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Both points live on the integer lattice, so comparing squared
    /// distances keeps ties exact.
    pub fn squared_distance(&self, other: &AxisScores) -> i32 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(x, y)| {
                let d = i32::from(*x) - i32::from(*y);
                d * d
            })
            .sum()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &AxisScores) -> f64 {
        f64::from(self.squared_distance(other)).sqrt()
    }
}

/// Sum the axis effects of the options chosen for the axis questions.
///
/// Only positions `0..AXIS_QUESTION_COUNT` are read.
pub fn score_axes(questions: &QuestionRegistry, answers: &[u8]) -> Result<AxisScores, QuizError> {
    questions.check_answer_count(answers)?;

    let mut scores = AxisScores::default();
    for position in 0..AXIS_QUESTION_COUNT {
        if let OptionEffect::Axis { axis, value } = questions.selected(position, answers)? {
            scores.add(axis, value);
        }
    }
    Ok(scores)
}
