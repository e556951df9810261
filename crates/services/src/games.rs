use std::sync::Arc;

use csr_core::game::{
    AnswerOutcome, GameDefinition, GameLibrary, GameSession, JournalEntry, MatchRecord, Pacing,
    PassThreshold, Reward, RewardConfig, RewardOverrides, SessionSummary, Tick,
};
use csr_core::model::{CategoryId, ItemId, OptionId};
use tracing::{debug, info, instrument};

use crate::error::GameError;

/// Application-wide defaults a game may override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSettings {
    pub rewards: RewardConfig,
    pub pacing: Pacing,
    pub pass_threshold: PassThreshold,
}

/// Read access to the game library and the entry point for playing.
#[derive(Clone)]
pub struct GameLibraryService {
    library: Arc<GameLibrary>,
    settings: GameSettings,
}

impl GameLibraryService {
    #[must_use]
    pub fn new(library: GameLibrary, settings: GameSettings) -> Self {
        Self {
            library: Arc::new(library),
            settings,
        }
    }

    #[must_use]
    pub fn games(&self) -> &[GameDefinition] {
        self.library.games()
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// # Errors
    ///
    /// Returns `GameError::UnknownGame` for an unknown slug.
    pub fn get(&self, slug: &str) -> Result<&GameDefinition, GameError> {
        self.library
            .get(slug)
            .ok_or_else(|| GameError::UnknownGame(slug.to_string()))
    }

    /// Starts a play-through. Rewards resolve once, here: `launch`
    /// overrides, then the game's own, then the defaults.
    ///
    /// # Errors
    ///
    /// Returns `GameError::UnknownGame` or a session error for empty content.
    #[instrument(skip(self, launch))]
    pub fn start(
        &self,
        slug: &str,
        launch: Option<&RewardOverrides>,
    ) -> Result<GamePlay, GameError> {
        let definition = self.get(slug)?.clone();
        let rewards = RewardConfig::resolve(
            self.settings.rewards,
            definition.rewards.as_ref(),
            launch,
        );
        let threshold = definition.pass_threshold_or(self.settings.pass_threshold);
        let session = GameSession::start(&definition, self.settings.pacing)?;
        info!(template = definition.template.label(), "game started");
        Ok(GamePlay {
            definition,
            session,
            rewards,
            threshold,
        })
    }
}

/// Final screen data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub summary: SessionSummary,
    pub reward: Reward,
}

/// One running game: the engine session plus its resolved settings.
#[derive(Debug, Clone)]
pub struct GamePlay {
    definition: GameDefinition,
    session: GameSession,
    rewards: RewardConfig,
    threshold: PassThreshold,
}

impl GamePlay {
    #[must_use]
    pub fn definition(&self) -> &GameDefinition {
        &self.definition
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn rewards(&self) -> RewardConfig {
        self.rewards
    }

    #[must_use]
    pub fn threshold(&self) -> PassThreshold {
        self.threshold
    }

    fn wrong_template(&self) -> GameError {
        GameError::WrongTemplate(self.definition.template.label())
    }

    /// # Errors
    ///
    /// `WrongTemplate` outside choice and timed games, otherwise any
    /// `SessionError` from the engine.
    pub fn answer(&mut self, option: OptionId) -> Result<AnswerOutcome, GameError> {
        let outcome = match &mut self.session {
            GameSession::Choice(quiz) => quiz.submit_answer(option)?,
            GameSession::Timed(quiz) => quiz.submit_answer(option)?,
            _ => return Err(self.wrong_template()),
        };
        debug!(correct = outcome.is_correct, "answer recorded");
        Ok(outcome)
    }

    /// Leaves the feedback phase.
    ///
    /// # Errors
    ///
    /// `WrongTemplate` outside choice and timed games, or
    /// `SessionError::NotAwaitingAdvance`.
    pub fn advance(&mut self) -> Result<(), GameError> {
        match &mut self.session {
            GameSession::Choice(quiz) => quiz.advance()?,
            GameSession::Timed(quiz) => quiz.advance()?,
            _ => return Err(self.wrong_template()),
        };
        Ok(())
    }

    /// Seconds left while a reflex prompt is waiting for an answer.
    #[must_use]
    pub fn countdown_remaining(&self) -> Option<u32> {
        match &self.session {
            GameSession::Timed(quiz) if quiz.is_counting() => Some(quiz.remaining_secs()),
            _ => None,
        }
    }

    /// One countdown second; `Tick::Idle` for games without a countdown.
    pub fn tick(&mut self) -> Tick {
        match &mut self.session {
            GameSession::Timed(quiz) => quiz.tick(),
            _ => Tick::Idle,
        }
    }

    /// # Errors
    ///
    /// `WrongTemplate` outside match games, or an unavailable item.
    pub fn select_item(&mut self, item: ItemId) -> Result<(), GameError> {
        match &mut self.session {
            GameSession::Match(puzzle) => Ok(puzzle.select_item(item)?),
            _ => Err(self.wrong_template()),
        }
    }

    /// # Errors
    ///
    /// `WrongTemplate` outside match games, or an unavailable category.
    pub fn select_category(&mut self, category: CategoryId) -> Result<(), GameError> {
        match &mut self.session {
            GameSession::Match(puzzle) => Ok(puzzle.select_category(category)?),
            _ => Err(self.wrong_template()),
        }
    }

    /// # Errors
    ///
    /// `WrongTemplate` outside match games, or `IncompleteSelection`.
    pub fn commit_match(&mut self) -> Result<MatchRecord, GameError> {
        match &mut self.session {
            GameSession::Match(puzzle) => Ok(puzzle.commit_match()?),
            _ => Err(self.wrong_template()),
        }
    }

    /// # Errors
    ///
    /// `WrongTemplate` outside journals, or `EntryTooShort` (nothing recorded).
    pub fn submit_entry(&mut self, text: &str) -> Result<JournalEntry, GameError> {
        match &mut self.session {
            GameSession::Journal(journal) => Ok(journal.submit_entry(text)?.clone()),
            _ => Err(self.wrong_template()),
        }
    }

    /// "Try again".
    pub fn reset(&mut self) {
        self.session.reset();
        debug!(slug = %self.definition.slug, "game reset");
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    /// Summary and earned reward once the session is finished.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let summary = self.session.summary(self.threshold)?;
        let reward = self
            .rewards
            .earned(&summary, self.definition.badge.as_deref());
        Some(GameResult { summary, reward })
    }
}

/// Waits out the feedback phase of `outcome`; call `advance()` afterwards.
pub async fn feedback_pause(outcome: &AnswerOutcome) {
    tokio::time::sleep(outcome.advance_after).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_core::game::{GameTemplate, SessionError};
    use std::time::Duration;

    fn service() -> GameLibraryService {
        GameLibraryService::new(GameLibrary::builtin().unwrap(), GameSettings::default())
    }

    fn correct_option(play: &GamePlay) -> OptionId {
        match play.session() {
            GameSession::Choice(quiz) => quiz.current_prompt().unwrap().correct_option().id,
            GameSession::Timed(quiz) => quiz.session().current_prompt().unwrap().correct_option().id,
            _ => panic!("not a choice game"),
        }
    }

    #[test]
    fn unknown_slug_is_reported() {
        assert!(matches!(
            service().start("missing", None),
            Err(GameError::UnknownGame(slug)) if slug == "missing"
        ));
    }

    #[test]
    fn launch_overrides_win_over_game_rewards() {
        let launch = RewardOverrides {
            coins_per_level: Some(25),
            ..RewardOverrides::default()
        };
        let play = service()
            .start("clean-hands-champion", Some(&launch))
            .unwrap();
        assert_eq!(play.rewards().coins_per_level, 25);
        assert_eq!(play.rewards().total_coins, 40);
        assert_eq!(play.rewards().total_xp, RewardConfig::default().total_xp);
        assert_eq!(play.threshold().percent(), 70);
    }

    #[test]
    fn perfect_badge_quiz_earns_badge_and_capped_coins() {
        let mut play = service().start("clean-hands-champion", None).unwrap();
        while !play.is_finished() {
            let option = correct_option(&play);
            assert!(play.answer(option).unwrap().is_correct);
            play.advance().unwrap();
        }
        let result = play.result().unwrap();
        assert!(result.summary.passed);
        assert_eq!(result.reward.coins, 30);
        assert_eq!(result.reward.badge.as_deref(), Some("Clean Hands Champion"));
    }

    #[test]
    fn answering_twice_without_advancing_is_rejected() {
        let mut play = service().start("honest-harry", None).unwrap();
        let option = correct_option(&play);
        play.answer(option).unwrap();
        assert!(matches!(
            play.answer(option),
            Err(GameError::Session(SessionError::AwaitingAdvance))
        ));
    }

    #[test]
    fn template_specific_actions_are_checked() {
        let mut play = service().start("healthy-plate", None).unwrap();
        assert_eq!(play.definition().template, GameTemplate::MatchPair);
        assert!(matches!(
            play.answer(OptionId::new(1)),
            Err(GameError::WrongTemplate(_))
        ));
        assert_eq!(play.tick(), Tick::Idle);
        assert_eq!(play.countdown_remaining(), None);
    }

    #[test]
    fn reflex_countdown_pauses_while_feedback_shows() {
        let mut play = service().start("road-safety-reflex", None).unwrap();
        assert_eq!(play.countdown_remaining(), Some(8));
        assert_eq!(play.tick(), Tick::Running(7));
        let option = correct_option(&play);
        play.answer(option).unwrap();
        assert_eq!(play.countdown_remaining(), None);
        assert_eq!(play.tick(), Tick::Idle);
        play.advance().unwrap();
        assert_eq!(play.countdown_remaining(), Some(8));
    }

    #[test]
    fn journal_rejects_short_entries_and_resets() {
        let mut play = service().start("gratitude-journal", None).unwrap();
        assert!(matches!(
            play.submit_entry("Mom"),
            Err(GameError::Session(SessionError::EntryTooShort { .. }))
        ));
        play.submit_entry("My teacher helped me with fractions.")
            .unwrap();
        assert_eq!(play.session().score(), 1);
        play.reset();
        assert_eq!(play.session().score(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn feedback_pause_follows_pacing() {
        let mut play = service().start("honest-harry", None).unwrap();
        let started = tokio::time::Instant::now();
        let outcome = play.answer(OptionId::new(3)).unwrap();
        assert!(!outcome.is_correct);
        feedback_pause(&outcome).await;
        assert_eq!(started.elapsed(), Duration::from_millis(800));
        play.advance().unwrap();
        assert_eq!(play.session().progress().completed, 1);
    }
}
