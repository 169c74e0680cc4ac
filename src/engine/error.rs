//! Quiz engine errors.

use thiserror::Error;

/// Errors surfaced by the classification engine and its registries.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The answer sequence does not have one entry per question.
    #[error("Expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },

    /// A selected option index falls outside the options declared by its question.
    #[error("Invalid answer at position {position}: option {option} (question has {options} options)")]
    InvalidAnswerIndex {
        position: usize,
        option: i64,
        options: usize,
    },

    /// A registry is empty or structurally invalid.
    #[error("Malformed registry: {0}")]
    MalformedRegistry(String),

    /// A persona slug that is not one of the known personas.
    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    /// The quiz session has already produced its result.
    #[error("Quiz session already completed")]
    SessionCompleted,

    /// YAML parsing of a registry override failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading a registry override failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuizError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRegistry(message.into())
    }

    /// Whether the error is the caller's fault (bad answers) rather than a
    /// configuration problem.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::AnswerCount { .. }
                | Self::InvalidAnswerIndex { .. }
                | Self::UnknownPersona(_)
                | Self::SessionCompleted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_answer_message_names_position() {
        let err = QuizError::InvalidAnswerIndex {
            position: 3,
            option: 2,
            options: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("position 3"));
        assert!(msg.contains("option 2"));
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_malformed_registry_is_not_caller_error() {
        let err = QuizError::malformed("persona registry is empty");
        assert_eq!(err.to_string(), "Malformed registry: persona registry is empty");
        assert!(!err.is_caller_error());
    }
}
