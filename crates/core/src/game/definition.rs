use serde::{Deserialize, Serialize};

use crate::game::journal::JournalStage;
use crate::game::matching::MatchSet;
use crate::game::prompt::Prompt;
use crate::game::rewards::RewardOverrides;
use crate::game::summary::PassThreshold;

/// The interaction template a game instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameTemplate {
    /// Multiple-choice story.
    SingleChoice,
    /// Multiple-choice quiz that awards a badge on a pass.
    BadgeQuiz,
    /// Drag-to-match puzzle.
    MatchPair,
    /// Reflex quiz with a per-prompt countdown.
    Timed,
    /// Journal / free-text entry.
    FreeText,
}

impl GameTemplate {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameTemplate::SingleChoice => "Story",
            GameTemplate::BadgeQuiz => "Badge Challenge",
            GameTemplate::MatchPair => "Match Puzzle",
            GameTemplate::Timed => "Reflex Quiz",
            GameTemplate::FreeText => "Journal",
        }
    }
}

/// Validated content for one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameContent {
    Choice(Vec<Prompt>),
    Timed {
        prompts: Vec<Prompt>,
        countdown_secs: u32,
    },
    Match(MatchSet),
    Journal(Vec<JournalStage>),
}

/// A complete, validated game ready to be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDefinition {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub template: GameTemplate,
    pub content: GameContent,
    pub badge: Option<String>,
    pub rewards: Option<RewardOverrides>,
    /// `None` defers to the application-wide threshold.
    pub pass_threshold: Option<PassThreshold>,
}

impl GameDefinition {
    /// Number of scored steps (prompts, items or stages).
    #[must_use]
    pub fn step_count(&self) -> usize {
        match &self.content {
            GameContent::Choice(prompts) | GameContent::Timed { prompts, .. } => prompts.len(),
            GameContent::Match(set) => set.items().len(),
            GameContent::Journal(stages) => stages.len(),
        }
    }

    #[must_use]
    pub fn pass_threshold_or(&self, fallback: PassThreshold) -> PassThreshold {
        self.pass_threshold.unwrap_or(fallback)
    }
}
