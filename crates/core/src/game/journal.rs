use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::session::SessionError;
use crate::game::summary::{PassThreshold, SessionSummary};
use crate::model::StageId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JournalError {
    #[error("journal needs at least one stage")]
    Empty,

    #[error("stage {0} has an empty prompt")]
    EmptyPrompt(StageId),

    #[error("stage {0} needs a minimum length above zero")]
    ZeroMinLength(StageId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalStage {
    pub id: StageId,
    pub prompt: String,
    pub min_length: usize,
}

/// An accepted journal entry, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub stage: StageId,
    pub text: String,
}

/// Free-text session. "Correct" means the entry met the length bar; the
/// text itself is never judged.
#[derive(Debug, Clone)]
pub struct Journal {
    stages: Vec<JournalStage>,
    index: usize,
    entries: Vec<JournalEntry>,
    finished: bool,
}

/// Characters after trimming; counts chars, not bytes.
#[must_use]
pub fn trimmed_length(entry: &str) -> usize {
    entry.trim().chars().count()
}

impl Journal {
    /// # Errors
    ///
    /// Returns `JournalError` when there are no stages or a stage is malformed.
    pub fn new(stages: Vec<JournalStage>) -> Result<Self, JournalError> {
        if stages.is_empty() {
            return Err(JournalError::Empty);
        }
        for stage in &stages {
            if stage.prompt.trim().is_empty() {
                return Err(JournalError::EmptyPrompt(stage.id));
            }
            if stage.min_length == 0 {
                return Err(JournalError::ZeroMinLength(stage.id));
            }
        }
        Ok(Self {
            stages,
            index: 0,
            entries: Vec::new(),
            finished: false,
        })
    }

    #[must_use]
    pub fn stages(&self) -> &[JournalStage] {
        &self.stages
    }

    #[must_use]
    pub fn current_stage(&self) -> Option<&JournalStage> {
        if self.finished {
            None
        } else {
            self.stages.get(self.index)
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.entries.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.stages.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether `entry` would be accepted at the current stage.
    #[must_use]
    pub fn meets_minimum(&self, entry: &str) -> bool {
        self.current_stage()
            .is_some_and(|stage| trimmed_length(entry) >= stage.min_length)
    }

    /// Accepts the entry and moves to the next stage.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EntryTooShort` (nothing changes) when the
    /// trimmed entry is below the stage minimum, or `SessionError::Finished`.
    pub fn submit_entry(&mut self, entry: &str) -> Result<&JournalEntry, SessionError> {
        let stage = self.current_stage().ok_or(SessionError::Finished)?;
        let len = trimmed_length(entry);
        if len < stage.min_length {
            return Err(SessionError::EntryTooShort {
                min: stage.min_length,
                len,
            });
        }

        let stage_id = stage.id;
        self.entries.push(JournalEntry {
            stage: stage_id,
            text: entry.trim().to_string(),
        });
        if self.index + 1 < self.stages.len() {
            self.index += 1;
        } else {
            self.finished = true;
        }
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.entries.clear();
        self.finished = false;
    }

    #[must_use]
    pub fn summary(&self, threshold: PassThreshold) -> Option<SessionSummary> {
        self.finished
            .then(|| SessionSummary::new(self.score(), self.total(), threshold))
    }
}
