//! Candidate pools keyed by the sign pattern of the axis scores.
//!
//! The mapping is curated data, kept as an explicit table rather than
//! branching logic. A pattern with no entry resolves to an empty pool, which
//! routes the engine to the nearest-persona fallback.
//!
//! # Example YAML
//!
//! ```yaml
//! candidates:
//!   "-1,-1,-1,-1": [gatssn]
//!   "-1,1,-1,1": [chonggak, gumiho]
//!   "0,0,0,0": [gatssn, dalgyal, haetae]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::engine::axis::{Axis, AxisScores};
use crate::engine::error::QuizError;
use crate::persona::PersonaSlug;

/// Largest candidate list a table entry may hold.
pub const MAX_CANDIDATES: usize = 3;
/// Fewest sign patterns a table must cover.
pub const MIN_COVERED_KEYS: usize = 10;
/// Fewest sign patterns that must need a tag tie-break.
pub const MIN_MULTI_CANDIDATE_KEYS: usize = 3;

/// Sign pattern of the four axis scores, e.g. `-1,0,1,1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignKey([i8; Axis::COUNT]);

impl SignKey {
    /// Key from explicit trits, each in `{-1, 0, 1}`.
    pub fn new(trits: [i8; Axis::COUNT]) -> Result<Self, String> {
        if trits.iter().any(|t| !(-1..=1).contains(t)) {
            return Err(format!("sign key components must be -1, 0 or 1: {:?}", trits));
        }
        Ok(Self(trits))
    }

    pub fn from_scores(scores: &AxisScores) -> Self {
        Self(scores.signs())
    }

    pub fn trits(&self) -> [i8; Axis::COUNT] {
        self.0
    }
}

impl fmt::Display for SignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{},{},{},{}", a, b, c, d)
    }
}

impl FromStr for SignKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != Axis::COUNT {
            return Err(format!("sign key '{}' must have {} components", s, Axis::COUNT));
        }
        let mut trits = [0i8; Axis::COUNT];
        for (slot, part) in trits.iter_mut().zip(parts) {
            *slot = part
                .parse()
                .map_err(|_| format!("sign key '{}' has a non-numeric component '{}'", s, part))?;
        }
        Self::new(trits)
    }
}

impl Serialize for SignKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SignKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Curated sign-pattern → candidate-list table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTable {
    candidates: BTreeMap<SignKey, Vec<PersonaSlug>>,
}

impl CandidateTable {
    /// The compiled-in table.
    pub fn builtin() -> Self {
        use PersonaSlug::*;

        let entries: [([i8; 4], &[PersonaSlug]); 14] = [
            // single candidate
            ([-1, -1, -1, -1], &[Gatssn]),
            ([1, 1, -1, 1], &[Dokkaebi]),
            ([-1, 1, 1, 1], &[Mulgwisin]),
            ([1, -1, -1, -1], &[Jeoseung]),
            ([-1, -1, 1, 1], &[Cheonyeo]),
            ([1, 1, 1, 1], &[Dokkaebi]),
            ([1, 1, -1, -1], &[Dokkaebi]),
            // decided by primary tag
            ([-1, 1, -1, 1], &[Chonggak, Gumiho]),
            ([-1, -1, 1, -1], &[Haetae, Jangseung]),
            ([1, -1, 1, -1], &[Dalgyal, Jeoseung]),
            ([1, -1, 1, 1], &[Dalgyal, Mulgwisin]),
            // patterns with a neutral axis
            ([0, -1, -1, -1], &[Gatssn, Jeoseung]),
            ([-1, 0, 1, -1], &[Haetae, Cheonyeo]),
            ([0, 0, 0, 0], &[Gatssn, Dalgyal, Haetae]),
        ];

        let candidates = entries
            .iter()
            .map(|(trits, pool)| (SignKey(*trits), pool.to_vec()))
            .collect();
        Self { candidates }
    }

    /// Build a table from explicit entries, validating it.
    pub fn new(candidates: BTreeMap<SignKey, Vec<PersonaSlug>>) -> Result<Self, QuizError> {
        let table = Self { candidates };
        table.validate()?;
        Ok(table)
    }

    /// Parse and validate a YAML table.
    pub fn from_yaml(yaml: &str) -> Result<Self, QuizError> {
        let table: Self = serde_yaml::from_str(yaml)?;
        table.validate()?;
        Ok(table)
    }

    /// Candidate pool for a key; empty when the key is not covered.
    pub fn get(&self, key: SignKey) -> &[PersonaSlug] {
        self.candidates.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidate pool for a set of axis scores.
    ///
    /// Depends only on the sign of each axis.
    pub fn resolve(&self, scores: &AxisScores) -> &[PersonaSlug] {
        self.get(SignKey::from_scores(scores))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SignKey, &[PersonaSlug])> {
        self.candidates.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Check entry sizes and the coverage properties the engine depends on.
    pub fn validate(&self) -> Result<(), QuizError> {
        let mut covered = HashSet::new();
        let mut multi = 0;

        for (key, pool) in &self.candidates {
            if pool.is_empty() || pool.len() > MAX_CANDIDATES {
                return Err(QuizError::malformed(format!(
                    "candidate list for '{}' must hold 1 to {} personas, found {}",
                    key,
                    MAX_CANDIDATES,
                    pool.len()
                )));
            }
            let unique: HashSet<_> = pool.iter().collect();
            if unique.len() != pool.len() {
                return Err(QuizError::malformed(format!(
                    "candidate list for '{}' repeats a persona",
                    key
                )));
            }
            if pool.len() > 1 {
                multi += 1;
            }
            covered.extend(pool.iter().copied());
        }

        if self.candidates.len() < MIN_COVERED_KEYS {
            return Err(QuizError::malformed(format!(
                "candidate table covers {} sign patterns, expected at least {}",
                self.candidates.len(),
                MIN_COVERED_KEYS
            )));
        }
        if multi < MIN_MULTI_CANDIDATE_KEYS {
            return Err(QuizError::malformed(format!(
                "candidate table has {} multi-candidate entries, expected at least {}",
                multi, MIN_MULTI_CANDIDATE_KEYS
            )));
        }
        if let Some(missing) = PersonaSlug::ALL.iter().find(|slug| !covered.contains(*slug)) {
            return Err(QuizError::malformed(format!(
                "persona '{}' never appears in the candidate table",
                missing
            )));
        }

        Ok(())
    }
}

impl Default for CandidateTable {
    fn default() -> Self {
        Self::builtin()
    }
}
