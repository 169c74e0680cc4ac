//! # Registry loading
//!
//! Builds a [`QuizEngine`] from the compiled-in registries, replacing any of
//! them with a YAML file found in an override directory:
//!
//! ```text
//! <dir>/questions.yaml   → QuestionRegistry
//! <dir>/personas.yaml    → PersonaRegistry
//! <dir>/candidates.yaml  → CandidateTable
//! ```
//!
//! A `.yml` extension is accepted as well. Files that are absent fall back to
//! the built-in data. A file that is present but fails to parse or validate
//! aborts loading.

use std::path::{Path, PathBuf};

use crate::engine::{CandidateTable, QuizEngine, QuizError};
use crate::persona::PersonaRegistry;
use crate::questions::QuestionRegistry;

pub const QUESTIONS_FILE: &str = "questions";
pub const PERSONAS_FILE: &str = "personas";
pub const CANDIDATES_FILE: &str = "candidates";

/// Which registries came from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub overridden: Vec<PathBuf>,
}

/// Find `<dir>/<stem>.yaml` or `<dir>/<stem>.yml`.
fn find_override(dir: &Path, stem: &str) -> Option<PathBuf> {
    ["yaml", "yml"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
}

fn load_one<T>(
    dir: &Path,
    stem: &str,
    parse: fn(&str) -> Result<T, QuizError>,
    builtin: fn() -> T,
    report: &mut LoadReport,
) -> Result<T, QuizError> {
    let Some(path) = find_override(dir, stem) else {
        return Ok(builtin());
    };

    let parsed = std::fs::read_to_string(&path)
        .map_err(QuizError::from)
        .and_then(|yaml| parse(&yaml));
    match parsed {
        Ok(value) => {
            log::debug!("Loaded {} override from {}", stem, path.display());
            report.overridden.push(path);
            Ok(value)
        }
        Err(e) => {
            log::warn!("Failed to load {} from {}: {}", stem, path.display(), e);
            Err(e)
        }
    }
}

/// Load the engine, applying overrides from `dir` when given.
///
/// A missing directory is treated like an empty one.
pub fn load_engine(dir: Option<&Path>) -> Result<(QuizEngine, LoadReport), QuizError> {
    let mut report = LoadReport::default();
    let Some(dir) = dir.filter(|d| d.is_dir()) else {
        if let Some(missing) = dir {
            log::warn!(
                "Registry directory {} does not exist, using built-in data",
                missing.display()
            );
        }
        return Ok((QuizEngine::builtin(), report));
    };

    let questions = load_one(
        dir,
        QUESTIONS_FILE,
        QuestionRegistry::from_yaml,
        QuestionRegistry::builtin,
        &mut report,
    )?;
    let personas = load_one(
        dir,
        PERSONAS_FILE,
        PersonaRegistry::from_yaml,
        PersonaRegistry::builtin,
        &mut report,
    )?;
    let table = load_one(
        dir,
        CANDIDATES_FILE,
        CandidateTable::from_yaml,
        CandidateTable::builtin,
        &mut report,
    )?;

    let engine = QuizEngine::new(questions, personas, table)?;
    Ok((engine, report))
}
