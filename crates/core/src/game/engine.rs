use crate::game::definition::{GameContent, GameDefinition};
use crate::game::journal::Journal;
use crate::game::matching::MatchPuzzle;
use crate::game::pacing::Pacing;
use crate::game::session::{QuizSession, SessionError};
use crate::game::summary::{PassThreshold, SessionSummary};
use crate::game::timed::TimedQuiz;

/// One play-through of any game, whatever its template.
///
/// Template-specific input goes through the matching variant; everything a
/// shell needs (progress, score, summary, reset) is answered here.
#[derive(Debug, Clone)]
pub enum GameSession {
    Choice(QuizSession),
    Timed(TimedQuiz),
    Match(MatchPuzzle),
    Journal(Journal),
}

/// Position within the session for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl GameSession {
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for content without any steps, or
    /// `SessionError::Journal` for journal stages that fail validation.
    pub fn start(definition: &GameDefinition, pacing: Pacing) -> Result<Self, SessionError> {
        let session = match &definition.content {
            GameContent::Choice(prompts) => {
                GameSession::Choice(QuizSession::new(prompts.clone(), pacing)?)
            }
            GameContent::Timed {
                prompts,
                countdown_secs,
            } => GameSession::Timed(TimedQuiz::new(prompts.clone(), *countdown_secs, pacing)?),
            GameContent::Match(set) => GameSession::Match(MatchPuzzle::new(set.clone())),
            GameContent::Journal(stages) => GameSession::Journal(Journal::new(stages.clone())?),
        };
        Ok(session)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        match self {
            GameSession::Choice(s) => s.is_finished(),
            GameSession::Timed(t) => t.session().is_finished(),
            GameSession::Match(m) => m.is_finished(),
            GameSession::Journal(j) => j.is_finished(),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        match self {
            GameSession::Choice(s) => s.score(),
            GameSession::Timed(t) => t.session().score(),
            GameSession::Match(m) => m.score(),
            GameSession::Journal(j) => j.score(),
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        match self {
            GameSession::Choice(s) => s.total(),
            GameSession::Timed(t) => t.session().total(),
            GameSession::Match(m) => m.total(),
            GameSession::Journal(j) => j.total(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        let (completed, total) = match self {
            GameSession::Choice(s) => (s.history().len(), s.total() as usize),
            GameSession::Timed(t) => (t.session().history().len(), t.session().total() as usize),
            GameSession::Match(m) => (m.history().len(), m.total() as usize),
            GameSession::Journal(j) => (j.entries().len(), j.total() as usize),
        };
        Progress { completed, total }
    }

    pub fn reset(&mut self) {
        match self {
            GameSession::Choice(s) => s.reset(),
            GameSession::Timed(t) => t.reset(),
            GameSession::Match(m) => m.reset(),
            GameSession::Journal(j) => j.reset(),
        }
    }

    #[must_use]
    pub fn summary(&self, threshold: PassThreshold) -> Option<SessionSummary> {
        match self {
            GameSession::Choice(s) => s.summary(threshold),
            GameSession::Timed(t) => t.summary(threshold),
            GameSession::Match(m) => m.summary(threshold),
            GameSession::Journal(j) => j.summary(threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::definition::GameTemplate;
    use crate::game::journal::JournalError;
    use crate::game::journal::tests::stages;
    use crate::game::matching::tests::habitats;
    use crate::game::session::tests::prompts;
    use crate::model::{CategoryId, ItemId, OptionId};

    fn definition(template: GameTemplate, content: GameContent) -> GameDefinition {
        GameDefinition {
            slug: "test".into(),
            title: "Test".into(),
            description: String::new(),
            template,
            content,
            badge: None,
            rewards: None,
            pass_threshold: None,
        }
    }

    #[test]
    fn each_template_starts_the_matching_machine() {
        let cases = [
            (GameTemplate::SingleChoice, GameContent::Choice(prompts(2))),
            (
                GameTemplate::Timed,
                GameContent::Timed {
                    prompts: prompts(2),
                    countdown_secs: 10,
                },
            ),
            (GameTemplate::MatchPair, GameContent::Match(habitats())),
            (GameTemplate::FreeText, GameContent::Journal(stages())),
        ];
        for (template, content) in cases {
            let session = GameSession::start(&definition(template, content), Pacing::instant())
                .unwrap();
            assert!(!session.is_finished());
            assert_eq!(session.score(), 0);
            assert_eq!(session.progress().completed, 0);
        }
    }

    #[test]
    fn reset_through_engine_clears_any_variant() {
        let def = definition(GameTemplate::MatchPair, GameContent::Match(habitats()));
        let mut session = GameSession::start(&def, Pacing::instant()).unwrap();
        if let GameSession::Match(puzzle) = &mut session {
            puzzle.select_item(ItemId::new(1)).unwrap();
            puzzle.select_category(CategoryId::new(1)).unwrap();
            puzzle.commit_match().unwrap();
        }
        assert_eq!(session.score(), 1);
        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.progress().completed, 0);
    }

    #[test]
    fn invalid_journal_stage_reports_its_own_error() {
        let mut bad = stages();
        bad[0].min_length = 0;
        let id = bad[0].id;
        let def = definition(GameTemplate::FreeText, GameContent::Journal(bad));
        assert_eq!(
            GameSession::start(&def, Pacing::instant()).unwrap_err(),
            SessionError::Journal(JournalError::ZeroMinLength(id))
        );
    }

    #[test]
    fn summary_comes_from_the_variant() {
        let def = definition(GameTemplate::SingleChoice, GameContent::Choice(prompts(1)));
        let mut session = GameSession::start(&def, Pacing::instant()).unwrap();
        if let GameSession::Choice(quiz) = &mut session {
            quiz.submit_answer(OptionId::new(1)).unwrap();
            quiz.advance().unwrap();
        }
        assert!(session.is_finished());
        assert!(session.summary(PassThreshold::default()).unwrap().passed);
    }
}
