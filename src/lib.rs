//! # persona-quiz
//!
//! Classification engine for a 16-question personality quiz. Eight axis
//! questions place the quiz taker on four bipolar axes; eight tag questions
//! count interests across eight tags. The axis sign pattern selects a curated
//! candidate pool and the tag counts pick one persona from it, with a
//! nearest-persona fallback for patterns the table does not cover.
//!
//! ```
//! use persona_quiz::{get_result, PersonaSlug};
//!
//! assert_eq!(get_result(&[0; 16]).unwrap(), PersonaSlug::Gatssn);
//! ```
//!
//! The engine is pure and holds only immutable data, so one [`QuizEngine`]
//! can be shared by every request handler. The `server` module wraps it in
//! an axum HTTP API.

pub mod config;
pub mod engine;
pub mod persona;
pub mod questions;
pub mod registry;
pub mod server;
pub mod session;
pub mod share;

pub use engine::{
    builtin_engine, get_result, AxisScores, Classification, QuizEngine, QuizError, Resolution,
    Tag, TagCounts,
};
pub use persona::{PersonaProfile, PersonaRegistry, PersonaSlug};
pub use questions::QuestionRegistry;
pub use session::QuizSession;
pub use share::{ShareConfig, ShareLinks};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
