//! Tag accumulation from the last eight answers.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::engine::error::QuizError;
use crate::questions::{OptionEffect, QuestionRegistry, AXIS_QUESTION_COUNT};

/// Secondary labels collected from the tag questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Design,
    Ux,
    DebtCleanup,
    Immersion,
    Automation,
    Connection,
    Testing,
    Governance,
}

impl Tag {
    pub const COUNT: usize = 8;

    pub const ALL: [Tag; Tag::COUNT] = [
        Tag::Design,
        Tag::Ux,
        Tag::DebtCleanup,
        Tag::Immersion,
        Tag::Automation,
        Tag::Connection,
        Tag::Testing,
        Tag::Governance,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name, as used in YAML registries and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Ux => "ux",
            Self::DebtCleanup => "debt_cleanup",
            Self::Immersion => "immersion",
            Self::Automation => "automation",
            Self::Connection => "connection",
            Self::Testing => "testing",
            Self::Governance => "governance",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown tag '{}'", s))
    }
}

/// How many tag-question answers named each tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagCounts {
    counts: [u8; Tag::COUNT],
}

impl TagCounts {
    /// Build counts from explicit `(tag, count)` pairs; unnamed tags are 0.
    pub fn from_pairs(pairs: &[(Tag, u8)]) -> Self {
        let mut counts = Self::default();
        for (tag, n) in pairs {
            counts.counts[tag.index()] = *n;
        }
        counts
    }

    pub fn get(&self, tag: Tag) -> u8 {
        self.counts[tag.index()]
    }

    /// Count for a persona's primary-tag label; unrecognised labels count 0.
    pub fn score_label(&self, label: &str) -> u8 {
        label.parse::<Tag>().map_or(0, |tag| self.get(tag))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&n| u32::from(n)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, u8)> + '_ {
        Tag::ALL.into_iter().map(move |tag| (tag, self.get(tag)))
    }

    fn increment(&mut self, tag: Tag) {
        let slot = &mut self.counts[tag.index()];
        *slot = slot.saturating_add(1);
    }
}

impl Serialize for TagCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Tag::COUNT))?;
        for (tag, n) in self.iter() {
            map.serialize_entry(tag.as_str(), &n)?;
        }
        map.end()
    }
}

/// Count the tags named by the options chosen for the tag questions.
///
/// Only positions `AXIS_QUESTION_COUNT..` are read.
pub fn accumulate_tags(questions: &QuestionRegistry, answers: &[u8]) -> Result<TagCounts, QuizError> {
    questions.check_answer_count(answers)?;

    let mut counts = TagCounts::default();
    for position in AXIS_QUESTION_COUNT..questions.len() {
        if let OptionEffect::Tag { tag } = questions.selected(position, answers)? {
            counts.increment(tag);
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_tag_part(tag_part: [u8; 8]) -> Vec<u8> {
        let mut answers = vec![0u8; 8];
        answers.extend_from_slice(&tag_part);
        answers
    }

    #[test]
    fn test_first_options_count_design_and_automation() {
        let counts = accumulate_tags(&QuestionRegistry::builtin(), &[0; 16]).unwrap();
        assert_eq!(
            counts,
            TagCounts::from_pairs(&[(Tag::Design, 4), (Tag::Automation, 4)])
        );
    }

    #[test]
    fn test_each_option_column_counts_two_tags() {
        let registry = QuestionRegistry::builtin();
        let expected = [
            (Tag::Design, Tag::Automation),
            (Tag::Ux, Tag::Connection),
            (Tag::DebtCleanup, Tag::Testing),
            (Tag::Immersion, Tag::Governance),
        ];
        for (option, (odd, even)) in expected.iter().enumerate() {
            let counts = accumulate_tags(&registry, &with_tag_part([option as u8; 8])).unwrap();
            assert_eq!(counts, TagCounts::from_pairs(&[(*odd, 4), (*even, 4)]));
        }
    }

    #[test]
    fn test_total_is_eight() {
        let counts = accumulate_tags(
            &QuestionRegistry::builtin(),
            &with_tag_part([0, 1, 2, 3, 0, 1, 2, 3]),
        )
        .unwrap();
        assert_eq!(counts.total(), 8);
    }

    #[test]
    fn test_axis_answers_do_not_move_tags() {
        let registry = QuestionRegistry::builtin();
        let tag_part = [1, 2, 3, 0, 1, 2, 3, 0];
        let mut flipped = vec![1u8; 8];
        flipped.extend_from_slice(&tag_part);
        assert_eq!(
            accumulate_tags(&registry, &with_tag_part(tag_part)).unwrap(),
            accumulate_tags(&registry, &flipped).unwrap()
        );
    }

    #[test]
    fn test_rejects_option_four() {
        let err = accumulate_tags(
            &QuestionRegistry::builtin(),
            &with_tag_part([0, 0, 0, 4, 0, 0, 0, 0]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidAnswerIndex { position: 11, option: 4, options: 4 }
        ));
    }

    #[test]
    fn test_score_label_ignores_unknown_labels() {
        let counts = TagCounts::from_pairs(&[(Tag::Immersion, 3)]);
        assert_eq!(counts.score_label("immersion"), 3);
        assert_eq!(counts.score_label("experiment"), 0);
        assert_eq!(counts.score_label(""), 0);
    }

    #[test]
    fn test_serializes_every_tag() {
        let json = serde_json::to_value(TagCounts::from_pairs(&[(Tag::Ux, 2)])).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), Tag::COUNT);
        assert_eq!(map["ux"], 2);
        assert_eq!(map["debt_cleanup"], 0);
    }

    #[test]
    fn test_tag_parse_roundtrip() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
        }
        assert!("UX".parse::<Tag>().is_err());
    }
}
