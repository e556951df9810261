use crate::game::pacing::Pacing;
use crate::game::prompt::Prompt;
use crate::game::session::{AnswerOutcome, QuizSession, SessionError, SessionState};
use crate::game::summary::{PassThreshold, SessionSummary};
use crate::model::OptionId;

/// Default per-prompt countdown of the reflex quiz.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 10;

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Countdown still running with this many seconds left.
    Running(u32),
    /// Countdown hit zero; the prompt was recorded as incorrect.
    Expired(AnswerOutcome),
    /// Nothing is counting down (feedback showing or session finished).
    Idle,
}

/// Reflex quiz: a `QuizSession` where every prompt carries a countdown.
///
/// The driver calls `tick()` once per second. Running out of time behaves
/// exactly like choosing a wrong answer.
#[derive(Debug, Clone)]
pub struct TimedQuiz {
    session: QuizSession,
    countdown_secs: u32,
    remaining: u32,
}

impl TimedQuiz {
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `prompts` is empty.
    pub fn new(
        prompts: Vec<Prompt>,
        countdown_secs: u32,
        pacing: Pacing,
    ) -> Result<Self, SessionError> {
        let countdown_secs = countdown_secs.max(1);
        Ok(Self {
            session: QuizSession::new(prompts, pacing)?,
            countdown_secs,
            remaining: countdown_secs,
        })
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn countdown_secs(&self) -> u32 {
        self.countdown_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    /// True while the current prompt is waiting for an answer.
    #[must_use]
    pub fn is_counting(&self) -> bool {
        !self.session.is_finished() && !self.session.is_showing_feedback()
    }

    pub fn tick(&mut self) -> Tick {
        if !self.is_counting() {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Tick::Running(self.remaining);
        }
        match self.session.record_timeout() {
            Ok(outcome) => Tick::Expired(outcome),
            Err(_) => Tick::Idle,
        }
    }

    /// # Errors
    ///
    /// See `QuizSession::submit_answer`.
    pub fn submit_answer(&mut self, option_id: OptionId) -> Result<AnswerOutcome, SessionError> {
        self.session.submit_answer(option_id)
    }

    /// Moves on and re-arms the countdown for the next prompt.
    ///
    /// # Errors
    ///
    /// See `QuizSession::advance`.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        let state = self.session.advance()?;
        self.remaining = self.countdown_secs;
        Ok(state)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.remaining = self.countdown_secs;
    }

    #[must_use]
    pub fn summary(&self, threshold: PassThreshold) -> Option<SessionSummary> {
        self.session.summary(threshold)
    }
}
