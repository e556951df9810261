use std::time::Duration;

use thiserror::Error;

use crate::game::journal::JournalError;
use crate::game::pacing::Pacing;
use crate::game::prompt::Prompt;
use crate::game::summary::{PassThreshold, SessionSummary};
use crate::model::{CategoryId, ItemId, OptionId, PromptId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Illegal transitions and rejected inputs for every session variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has no prompts")]
    Empty,

    #[error("session already finished")]
    Finished,

    #[error("answer already recorded; waiting to advance")]
    AwaitingAdvance,

    #[error("nothing to advance from")]
    NotAwaitingAdvance,

    #[error("option {0} does not belong to the current prompt")]
    UnknownOption(OptionId),

    #[error("item {0} is unknown or already matched")]
    ItemUnavailable(ItemId),

    #[error("category {0} is unknown or already matched")]
    CategoryUnavailable(CategoryId),

    #[error("select an item and a category before matching")]
    IncompleteSelection,

    #[error("entry needs at least {min} characters, got {len}")]
    EntryTooShort { min: usize, len: usize },

    #[error(transparent)]
    Journal(#[from] JournalError),
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// One recorded answer. `option_id` is `None` when the countdown ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub prompt_id: PromptId,
    pub option_id: Option<OptionId>,
    pub is_correct: bool,
}

/// Externally visible state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active { index: usize, score: u32 },
    Finished { score: u32, total: u32 },
}

/// What the UI should do after an answer was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    /// Fire the transient "correct" flash; it clears after `feedback_clear`.
    pub celebrate: bool,
    pub feedback_clear: Duration,
    /// Wait this long, then call `advance()`.
    pub advance_after: Duration,
}

impl AnswerOutcome {
    pub(crate) fn new(is_correct: bool, pacing: &Pacing) -> Self {
        Self {
            is_correct,
            celebrate: is_correct,
            feedback_clear: pacing.feedback_clear,
            advance_after: pacing.advance_delay(is_correct),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Awaiting,
    Feedback,
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Single-choice quiz session: one option per prompt, fixed order.
///
/// `Active` sessions alternate between awaiting an answer and showing
/// feedback; `advance()` moves to the next prompt or finishes the session.
#[derive(Debug, Clone)]
pub struct QuizSession {
    prompts: Vec<Prompt>,
    pacing: Pacing,
    index: usize,
    score: u32,
    history: Vec<AnswerRecord>,
    phase: Phase,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `prompts` is empty.
    pub fn new(prompts: Vec<Prompt>, pacing: Pacing) -> Result<Self, SessionError> {
        if prompts.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            prompts,
            pacing,
            index: 0,
            score: 0,
            history: Vec::new(),
            phase: Phase::Awaiting,
        })
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Finished => SessionState::Finished {
                score: self.score,
                total: self.total(),
            },
            Phase::Awaiting | Phase::Feedback => SessionState::Active {
                index: self.index,
                score: self.score,
            },
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.prompts.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    #[must_use]
    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// True between an answer and the following `advance()`.
    #[must_use]
    pub fn is_showing_feedback(&self) -> bool {
        self.phase == Phase::Feedback
    }

    #[must_use]
    pub fn current_prompt(&self) -> Option<&Prompt> {
        match self.phase {
            Phase::Finished => None,
            Phase::Awaiting | Phase::Feedback => self.prompts.get(self.index),
        }
    }

    /// Answer recorded for the prompt currently on screen, if any.
    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        match self.phase {
            Phase::Feedback => self.history.last(),
            Phase::Awaiting | Phase::Finished => None,
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the last prompt,
    /// `SessionError::AwaitingAdvance` if this prompt was already answered,
    /// and `SessionError::UnknownOption` for ids not on the current prompt.
    pub fn submit_answer(&mut self, option_id: OptionId) -> Result<AnswerOutcome, SessionError> {
        self.ensure_awaiting()?;
        let prompt = &self.prompts[self.index];
        let option = prompt
            .option(option_id)
            .ok_or(SessionError::UnknownOption(option_id))?;
        let is_correct = option.is_correct;
        let prompt_id = prompt.id();
        Ok(self.record(prompt_id, Some(option_id), is_correct))
    }

    /// Records the current prompt as unanswered (and therefore incorrect).
    ///
    /// # Errors
    ///
    /// Same preconditions as `submit_answer`.
    pub fn record_timeout(&mut self) -> Result<AnswerOutcome, SessionError> {
        self.ensure_awaiting()?;
        let prompt_id = self.prompts[self.index].id();
        Ok(self.record(prompt_id, None, false))
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotAwaitingAdvance` unless feedback is showing.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        if self.phase != Phase::Feedback {
            return Err(SessionError::NotAwaitingAdvance);
        }
        if self.index + 1 < self.prompts.len() {
            self.index += 1;
            self.phase = Phase::Awaiting;
        } else {
            self.phase = Phase::Finished;
        }
        Ok(self.state())
    }

    /// Back to the first prompt with a clean score ("Try Again").
    pub fn reset(&mut self) {
        self.index = 0;
        self.score = 0;
        self.history.clear();
        self.phase = Phase::Awaiting;
    }

    #[must_use]
    pub fn summary(&self, threshold: PassThreshold) -> Option<SessionSummary> {
        self.is_finished()
            .then(|| SessionSummary::new(self.score, self.total(), threshold))
    }

    fn ensure_awaiting(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Awaiting => Ok(()),
            Phase::Feedback => Err(SessionError::AwaitingAdvance),
            Phase::Finished => Err(SessionError::Finished),
        }
    }

    fn record(
        &mut self,
        prompt_id: PromptId,
        option_id: Option<OptionId>,
        is_correct: bool,
    ) -> AnswerOutcome {
        self.history.push(AnswerRecord {
            prompt_id,
            option_id,
            is_correct,
        });
        if is_correct {
            self.score += 1;
        }
        self.phase = Phase::Feedback;
        AnswerOutcome::new(is_correct, &self.pacing)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::game::prompt::AnswerOption;

    /// Prompts whose correct option is always id 1; id 2 is wrong.
    pub(crate) fn prompts(n: u32) -> Vec<Prompt> {
        (1..=n)
            .map(|i| {
                Prompt::new(
                    PromptId::new(i),
                    format!("Prompt {i}"),
                    None,
                    vec![
                        AnswerOption::new(1, "right", true),
                        AnswerOption::new(2, "wrong", false),
                    ],
                )
                .unwrap()
            })
            .collect()
    }

    fn answer(session: &mut QuizSession, option: u32) -> AnswerOutcome {
        let outcome = session.submit_answer(OptionId::new(option)).unwrap();
        session.advance().unwrap();
        outcome
    }

    #[test]
    fn finishes_after_n_answers_and_rejects_more() {
        let mut session = QuizSession::new(prompts(3), Pacing::instant()).unwrap();
        answer(&mut session, 1);
        answer(&mut session, 2);
        assert_eq!(session.state(), SessionState::Active { index: 2, score: 1 });
        answer(&mut session, 1);

        assert_eq!(session.state(), SessionState::Finished { score: 2, total: 3 });
        assert_eq!(
            session.submit_answer(OptionId::new(1)),
            Err(SessionError::Finished)
        );
        assert!(session.current_prompt().is_none());
    }

    #[test]
    fn score_counts_correct_history_entries() {
        let mut session = QuizSession::new(prompts(4), Pacing::instant()).unwrap();
        for option in [1, 1, 2, 1] {
            answer(&mut session, option);
        }
        let correct = session.history().iter().filter(|r| r.is_correct).count();
        assert_eq!(session.score() as usize, correct);
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn second_answer_before_advance_is_rejected() {
        let mut session = QuizSession::new(prompts(2), Pacing::default()).unwrap();
        let outcome = session.submit_answer(OptionId::new(1)).unwrap();
        assert!(outcome.celebrate);
        assert_eq!(outcome.advance_after, Pacing::default().correct_advance);

        assert_eq!(
            session.submit_answer(OptionId::new(2)),
            Err(SessionError::AwaitingAdvance)
        );
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn wrong_answer_uses_short_delay_without_celebration() {
        let mut session = QuizSession::new(prompts(1), Pacing::default()).unwrap();
        let outcome = session.submit_answer(OptionId::new(2)).unwrap();
        assert!(!outcome.celebrate);
        assert_eq!(outcome.advance_after, Pacing::default().incorrect_advance);
    }

    #[test]
    fn unknown_option_mutates_nothing() {
        let mut session = QuizSession::new(prompts(2), Pacing::instant()).unwrap();
        assert_eq!(
            session.submit_answer(OptionId::new(9)),
            Err(SessionError::UnknownOption(OptionId::new(9)))
        );
        assert!(session.history().is_empty());
        assert!(!session.is_showing_feedback());
    }

    #[test]
    fn advance_requires_recorded_answer() {
        let mut session = QuizSession::new(prompts(2), Pacing::instant()).unwrap();
        assert_eq!(session.advance(), Err(SessionError::NotAwaitingAdvance));
    }

    #[test]
    fn reset_returns_to_initial_state_from_any_state() {
        let mut session = QuizSession::new(prompts(2), Pacing::instant()).unwrap();
        session.submit_answer(OptionId::new(1)).unwrap();
        session.reset();
        assert_eq!(session.state(), SessionState::Active { index: 0, score: 0 });
        assert!(session.history().is_empty());

        answer(&mut session, 1);
        answer(&mut session, 1);
        assert!(session.is_finished());
        session.reset();
        assert_eq!(session.state(), SessionState::Active { index: 0, score: 0 });
        assert!(session.history().is_empty());
    }

    #[test]
    fn timeout_is_recorded_as_incorrect_without_option() {
        let mut session = QuizSession::new(prompts(2), Pacing::instant()).unwrap();
        let outcome = session.record_timeout().unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(session.history()[0].option_id, None);
        assert_eq!(session.advance(), Ok(SessionState::Active { index: 1, score: 0 }));
    }

    #[test]
    fn summary_only_after_finish() {
        let mut session = QuizSession::new(prompts(1), Pacing::instant()).unwrap();
        assert!(session.summary(PassThreshold::default()).is_none());
        answer(&mut session, 1);
        let summary = session.summary(PassThreshold::default()).unwrap();
        assert!(summary.passed);
        assert_eq!((summary.score, summary.total), (1, 1));
    }

    #[test]
    fn empty_session_is_rejected() {
        assert_eq!(
            QuizSession::new(Vec::new(), Pacing::instant()).unwrap_err(),
            SessionError::Empty
        );
    }
}
