use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{OptionId, PromptId};

/// Fewest options a prompt may offer.
pub const MIN_OPTIONS: usize = 2;
/// Most options a prompt may offer.
pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PromptError {
    #[error("prompt text cannot be empty")]
    EmptyText,

    #[error("prompt needs 2-4 options, got {0}")]
    OptionCount(usize),

    #[error("option {0} has an empty label")]
    EmptyLabel(OptionId),

    #[error("option id {0} is used twice")]
    DuplicateOption(OptionId),

    #[error("prompt must have exactly one correct option, found {0}")]
    CorrectCount(usize),
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub label: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl AnswerOption {
    #[must_use]
    pub fn new(id: u32, label: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: OptionId::new(id),
            label: label.into(),
            is_correct,
        }
    }
}

/// A validated question/scenario with its options.
///
/// Construction enforces the content invariants: 2–4 options, unique option
/// ids, non-empty labels, and exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    id: PromptId,
    text: String,
    media: Option<String>,
    options: Vec<AnswerOption>,
}

impl Prompt {
    /// # Errors
    ///
    /// Returns `PromptError` when any content invariant is violated.
    pub fn new(
        id: PromptId,
        text: impl Into<String>,
        media: Option<String>,
        options: Vec<AnswerOption>,
    ) -> Result<Self, PromptError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PromptError::EmptyText);
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(PromptError::OptionCount(options.len()));
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if option.label.trim().is_empty() {
                return Err(PromptError::EmptyLabel(option.id));
            }
            if !seen.insert(option.id) {
                return Err(PromptError::DuplicateOption(option.id));
            }
        }

        let correct = options.iter().filter(|o| o.is_correct).count();
        if correct != 1 {
            return Err(PromptError::CorrectCount(correct));
        }

        Ok(Self {
            id,
            text,
            media: media.filter(|m| !m.trim().is_empty()),
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> PromptId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Emoji or media tag shown next to the prompt.
    #[must_use]
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    #[must_use]
    pub fn correct_option(&self) -> &AnswerOption {
        // Constructor guarantees exactly one.
        self.options
            .iter()
            .find(|o| o.is_correct)
            .unwrap_or(&self.options[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(correct: &[bool]) -> Vec<AnswerOption> {
        correct
            .iter()
            .enumerate()
            .map(|(i, c)| AnswerOption::new(i as u32 + 1, format!("Option {i}"), *c))
            .collect()
    }

    #[test]
    fn accepts_single_correct_option() {
        let prompt = Prompt::new(
            PromptId::new(1),
            "Who helps?",
            Some("🙂".into()),
            options(&[false, true, false]),
        )
        .unwrap();
        assert_eq!(prompt.correct_option().id, OptionId::new(2));
        assert_eq!(prompt.media(), Some("🙂"));
    }

    #[test]
    fn rejects_zero_or_two_correct_options() {
        let none = Prompt::new(PromptId::new(1), "Q", None, options(&[false, false]));
        assert_eq!(none.unwrap_err(), PromptError::CorrectCount(0));

        let two = Prompt::new(PromptId::new(1), "Q", None, options(&[true, true, false]));
        assert_eq!(two.unwrap_err(), PromptError::CorrectCount(2));
    }

    #[test]
    fn rejects_option_count_outside_bounds() {
        let one = Prompt::new(PromptId::new(1), "Q", None, options(&[true]));
        assert_eq!(one.unwrap_err(), PromptError::OptionCount(1));

        let five = Prompt::new(
            PromptId::new(1),
            "Q",
            None,
            options(&[true, false, false, false, false]),
        );
        assert_eq!(five.unwrap_err(), PromptError::OptionCount(5));
    }

    #[test]
    fn rejects_duplicate_option_ids() {
        let opts = vec![
            AnswerOption::new(1, "A", true),
            AnswerOption::new(1, "B", false),
        ];
        let err = Prompt::new(PromptId::new(1), "Q", None, opts).unwrap_err();
        assert_eq!(err, PromptError::DuplicateOption(OptionId::new(1)));
    }

    #[test]
    fn blank_media_is_dropped() {
        let prompt =
            Prompt::new(PromptId::new(1), "Q", Some("  ".into()), options(&[true, false]))
                .unwrap();
        assert_eq!(prompt.media(), None);
    }
}
