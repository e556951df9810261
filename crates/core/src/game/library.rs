//! Declarative game library.
//!
//! Games are authored in TOML, one `[[game]]` table each. Loading validates
//! every definition up front so a broken prompt never reaches a child.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::game::definition::{GameContent, GameDefinition, GameTemplate};
use crate::game::journal::{Journal, JournalError, JournalStage};
use crate::game::matching::{MatchCategory, MatchItem, MatchSet, MatchSetError};
use crate::game::prompt::{AnswerOption, Prompt, PromptError};
use crate::game::rewards::RewardOverrides;
use crate::game::summary::{PassThreshold, PassThresholdError};
use crate::game::timed::DEFAULT_COUNTDOWN_SECS;
use crate::model::{CategoryId, ItemId, PromptId};

/// Library compiled into the binary.
pub const BUILTIN_LIBRARY: &str = include_str!("../../content/games.toml");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LibraryError {
    #[error("library file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("game slug `{0}` is used twice")]
    DuplicateSlug(String),

    #[error("game `{slug}`: {source}")]
    Game {
        slug: String,
        #[source]
        source: GameContentError,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameContentError {
    #[error("slug and title are required")]
    MissingIdentity,

    #[error("template needs `{0}`")]
    MissingContent(&'static str),

    #[error("badge quizzes need a badge name")]
    MissingBadge,

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Match(#[from] MatchSetError),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Threshold(#[from] PassThresholdError),
}

//
// ─── FILE SCHEMA ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct LibraryFile {
    #[serde(default, rename = "game")]
    games: Vec<GameEntry>,
}

#[derive(Debug, Deserialize)]
struct GameEntry {
    slug: String,
    title: String,
    #[serde(default)]
    description: String,
    template: GameTemplate,
    #[serde(default)]
    badge: Option<String>,
    #[serde(default)]
    pass_percent: Option<u8>,
    #[serde(default)]
    countdown_secs: Option<u32>,
    #[serde(default)]
    rewards: Option<RewardOverrides>,
    #[serde(default)]
    prompts: Vec<PromptEntry>,
    #[serde(default)]
    items: Vec<MatchItem>,
    #[serde(default)]
    categories: Vec<MatchCategory>,
    #[serde(default)]
    pairs: Vec<PairEntry>,
    #[serde(default)]
    stages: Vec<JournalStage>,
}

#[derive(Debug, Deserialize)]
struct PromptEntry {
    id: u32,
    text: String,
    #[serde(default)]
    media: Option<String>,
    options: Vec<AnswerOption>,
}

#[derive(Debug, Deserialize)]
struct PairEntry {
    item: u32,
    category: u32,
}

impl GameEntry {
    fn into_definition(self) -> Result<GameDefinition, GameContentError> {
        if self.slug.trim().is_empty() || self.title.trim().is_empty() {
            return Err(GameContentError::MissingIdentity);
        }
        let pass_threshold = self.pass_percent.map(PassThreshold::new).transpose()?;

        let content = match self.template {
            GameTemplate::SingleChoice | GameTemplate::BadgeQuiz => {
                GameContent::Choice(build_prompts(self.prompts)?)
            }
            GameTemplate::Timed => GameContent::Timed {
                prompts: build_prompts(self.prompts)?,
                countdown_secs: self.countdown_secs.unwrap_or(DEFAULT_COUNTDOWN_SECS).max(1),
            },
            GameTemplate::MatchPair => {
                if self.items.is_empty() {
                    return Err(GameContentError::MissingContent("items"));
                }
                let pairs = self
                    .pairs
                    .iter()
                    .map(|p| (ItemId::new(p.item), CategoryId::new(p.category)));
                GameContent::Match(MatchSet::new(self.items, self.categories, pairs)?)
            }
            GameTemplate::FreeText => {
                // Run the journal's own checks without keeping the session.
                Journal::new(self.stages.clone())?;
                GameContent::Journal(self.stages)
            }
        };

        let badge = self.badge.filter(|b| !b.trim().is_empty());
        if self.template == GameTemplate::BadgeQuiz && badge.is_none() {
            return Err(GameContentError::MissingBadge);
        }

        Ok(GameDefinition {
            slug: self.slug,
            title: self.title,
            description: self.description,
            template: self.template,
            content,
            badge,
            rewards: self.rewards,
            pass_threshold,
        })
    }
}

fn build_prompts(entries: Vec<PromptEntry>) -> Result<Vec<Prompt>, GameContentError> {
    if entries.is_empty() {
        return Err(GameContentError::MissingContent("prompts"));
    }
    entries
        .into_iter()
        .map(|e| Prompt::new(PromptId::new(e.id), e.text, e.media, e.options).map_err(Into::into))
        .collect()
}

//
// ─── LIBRARY ───────────────────────────────────────────────────────────────────
//

/// Ordered, slug-unique collection of validated games.
#[derive(Debug, Clone, Default)]
pub struct GameLibrary {
    games: Vec<GameDefinition>,
}

impl GameLibrary {
    /// # Errors
    ///
    /// Returns `LibraryError` for malformed TOML, duplicate slugs, or the
    /// first game whose content fails validation.
    pub fn from_toml_str(raw: &str) -> Result<Self, LibraryError> {
        let file: LibraryFile = toml::from_str(raw)?;
        let mut seen = HashSet::new();
        let mut games = Vec::with_capacity(file.games.len());
        for entry in file.games {
            let slug = entry.slug.clone();
            if !seen.insert(slug.clone()) {
                return Err(LibraryError::DuplicateSlug(slug));
            }
            let definition = entry
                .into_definition()
                .map_err(|source| LibraryError::Game { slug, source })?;
            games.push(definition);
        }
        Ok(Self { games })
    }

    /// # Errors
    ///
    /// Only if the embedded library is broken, which the tests below rule out.
    pub fn builtin() -> Result<Self, LibraryError> {
        Self::from_toml_str(BUILTIN_LIBRARY)
    }

    #[must_use]
    pub fn games(&self) -> &[GameDefinition] {
        &self.games
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&GameDefinition> {
        self.games.iter().find(|g| g.slug == slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
