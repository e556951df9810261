mod definition;
mod engine;
mod journal;
mod library;
mod matching;
mod pacing;
mod prompt;
mod rewards;
mod session;
mod summary;
mod timed;

pub use definition::{GameContent, GameDefinition, GameTemplate};
pub use engine::{GameSession, Progress};
pub use journal::{Journal, JournalEntry, JournalError, JournalStage, trimmed_length};
pub use library::{BUILTIN_LIBRARY, GameContentError, GameLibrary, LibraryError};
pub use matching::{MatchCategory, MatchItem, MatchPuzzle, MatchRecord, MatchSet, MatchSetError};
pub use pacing::Pacing;
pub use prompt::{AnswerOption, Prompt, PromptError};
pub use rewards::{Reward, RewardConfig, RewardOverrides};
pub use session::{AnswerOutcome, AnswerRecord, QuizSession, SessionError, SessionState};
pub use summary::{PassThreshold, PassThresholdError, SessionSummary};
pub use timed::{DEFAULT_COUNTDOWN_SECS, Tick, TimedQuiz};
