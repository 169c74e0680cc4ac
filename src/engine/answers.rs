//! Boundary validation for answer sequences arriving from outside the crate.

use crate::engine::error::QuizError;
use crate::questions::QuestionRegistry;

/// Convert raw option indices into a checked answer sequence.
///
/// Every position must hold an index within its question's options. Out of
/// range values are reported as received, including negatives.
pub fn validate_answers(questions: &QuestionRegistry, raw: &[i64]) -> Result<Vec<u8>, QuizError> {
    if raw.len() != questions.len() {
        return Err(QuizError::AnswerCount {
            expected: questions.len(),
            actual: raw.len(),
        });
    }

    raw.iter()
        .enumerate()
        .map(|(position, &option)| {
            let options = questions.option_count(position);
            u8::try_from(option)
                .ok()
                .filter(|&index| usize::from(index) < options)
                .ok_or(QuizError::InvalidAnswerIndex {
                    position,
                    option,
                    options,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_answers_pass_through() {
        let raw: Vec<i64> = [0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 2, 3, 3, 2, 1, 0].to_vec();
        let answers = validate_answers(&QuestionRegistry::builtin(), &raw).unwrap();
        assert_eq!(answers, vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 2, 3, 3, 2, 1, 0]);
    }

    #[test]
    fn test_wrong_length() {
        let err = validate_answers(&QuestionRegistry::builtin(), &[0; 15]).unwrap_err();
        assert!(matches!(
            err,
            QuizError::AnswerCount {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_axis_question_accepts_only_two_options() {
        let mut raw = vec![0i64; 16];
        raw[2] = 2;
        let err = validate_answers(&QuestionRegistry::builtin(), &raw).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidAnswerIndex {
                position: 2,
                option: 2,
                options: 2
            }
        ));
    }

    #[test]
    fn test_negative_and_huge_indices_rejected() {
        let mut raw = vec![0i64; 16];
        raw[9] = -1;
        assert!(matches!(
            validate_answers(&QuestionRegistry::builtin(), &raw),
            Err(QuizError::InvalidAnswerIndex { position: 9, option: -1, .. })
        ));

        raw[9] = 4;
        assert!(validate_answers(&QuestionRegistry::builtin(), &raw).is_err());

        raw[9] = i64::from(u8::MAX) + 1;
        assert!(validate_answers(&QuestionRegistry::builtin(), &raw).is_err());
    }
}
