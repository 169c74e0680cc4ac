//! Persona identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::error::QuizError;

/// One of the ten personas the engine can select, identified by its URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaSlug {
    Gatssn,
    Chonggak,
    Cheonyeo,
    Dokkaebi,
    Gumiho,
    Haetae,
    Jangseung,
    Jeoseung,
    Mulgwisin,
    Dalgyal,
}

impl PersonaSlug {
    pub const COUNT: usize = 10;

    /// All personas in registry order.
    pub const ALL: [PersonaSlug; PersonaSlug::COUNT] = [
        PersonaSlug::Gatssn,
        PersonaSlug::Chonggak,
        PersonaSlug::Cheonyeo,
        PersonaSlug::Dokkaebi,
        PersonaSlug::Gumiho,
        PersonaSlug::Haetae,
        PersonaSlug::Jangseung,
        PersonaSlug::Jeoseung,
        PersonaSlug::Mulgwisin,
        PersonaSlug::Dalgyal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gatssn => "gatssn",
            Self::Chonggak => "chonggak",
            Self::Cheonyeo => "cheonyeo",
            Self::Dokkaebi => "dokkaebi",
            Self::Gumiho => "gumiho",
            Self::Haetae => "haetae",
            Self::Jangseung => "jangseung",
            Self::Jeoseung => "jeoseung",
            Self::Mulgwisin => "mulgwisin",
            Self::Dalgyal => "dalgyal",
        }
    }
}

impl fmt::Display for PersonaSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaSlug {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonaSlug::ALL
            .into_iter()
            .find(|slug| slug.as_str() == s)
            .ok_or_else(|| QuizError::UnknownPersona(s.to_string()))
    }
}
