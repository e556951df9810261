use csr_core::game::{GameDefinition, GameTemplate, Progress};
use services::GameResult;

/// One tile in the game library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameCardVm {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub template_label: &'static str,
    pub icon: &'static str,
    pub badge: Option<String>,
    pub steps: String,
}

fn template_icon(template: GameTemplate) -> &'static str {
    match template {
        GameTemplate::SingleChoice => "📖",
        GameTemplate::BadgeQuiz => "🏅",
        GameTemplate::MatchPair => "🧩",
        GameTemplate::Timed => "⏱️",
        GameTemplate::FreeText => "✏️",
    }
}

#[must_use]
pub fn map_game_cards(games: &[GameDefinition]) -> Vec<GameCardVm> {
    games
        .iter()
        .map(|game| {
            let unit = match game.template {
                GameTemplate::MatchPair => "items",
                GameTemplate::FreeText => "entries",
                _ => "questions",
            };
            GameCardVm {
                slug: game.slug.clone(),
                title: game.title.clone(),
                description: game.description.clone(),
                template_label: game.template.label(),
                icon: template_icon(game.template),
                badge: game.badge.clone(),
                steps: format!("{} {unit}", game.step_count()),
            }
        })
        .collect()
}

/// How a prompt or item `media` tag is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaVm {
    /// URL or asset path.
    Image(String),
    /// Emoji or other short text, shown inline.
    Glyph(String),
}

const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];

#[must_use]
pub fn map_media(raw: &str) -> MediaVm {
    let tag = raw.trim();
    let lower = tag.to_ascii_lowercase();
    let is_path = lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with('/')
        || lower.starts_with("assets/")
        || IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext));
    if is_path {
        MediaVm::Image(tag.to_string())
    } else {
        MediaVm::Glyph(tag.to_string())
    }
}

/// Width of the progress bar, 0..=100.
#[must_use]
pub fn progress_percent(progress: Progress) -> usize {
    if progress.total == 0 {
        return 0;
    }
    (progress.completed * 100 / progress.total).min(100)
}

/// Final screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub headline: &'static str,
    pub passed: bool,
    pub score: String,
    pub percent: String,
    pub coins: u32,
    pub xp: u32,
    pub badge: Option<String>,
}

#[must_use]
pub fn map_result(result: &GameResult) -> ResultVm {
    let summary = &result.summary;
    ResultVm {
        headline: if summary.passed {
            "Great job!"
        } else {
            "Good try! Practice makes perfect."
        },
        passed: summary.passed,
        score: format!("{} / {}", summary.score, summary.total),
        percent: format!("{}%", summary.percent()),
        coins: result.reward.coins,
        xp: result.reward.xp,
        badge: result.reward.badge.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_core::game::{GameLibrary, PassThreshold, Reward, SessionSummary};

    #[test]
    fn emoji_media_is_text_and_paths_are_images() {
        assert_eq!(map_media("🚦"), MediaVm::Glyph("🚦".into()));
        assert_eq!(
            map_media("https://cdn.example/plate.png"),
            MediaVm::Image("https://cdn.example/plate.png".into())
        );
        assert_eq!(
            map_media("assets/games/zebra.svg"),
            MediaVm::Image("assets/games/zebra.svg".into())
        );
        assert_eq!(map_media("lantern.JPG"), MediaVm::Image("lantern.JPG".into()));
    }

    #[test]
    fn builtin_games_map_to_cards() {
        let library = GameLibrary::builtin().unwrap();
        let cards = map_game_cards(library.games());
        let plate = cards.iter().find(|c| c.slug == "healthy-plate").unwrap();
        assert_eq!(plate.steps, "4 items");
        assert_eq!(plate.icon, "🧩");
        let badge = cards.iter().find(|c| c.slug == "clean-hands-champion").unwrap();
        assert_eq!(badge.badge.as_deref(), Some("Clean Hands Champion"));
    }

    #[test]
    fn progress_handles_empty_and_full() {
        assert_eq!(progress_percent(Progress { completed: 0, total: 0 }), 0);
        assert_eq!(progress_percent(Progress { completed: 1, total: 4 }), 25);
        assert_eq!(progress_percent(Progress { completed: 4, total: 4 }), 100);
    }

    #[test]
    fn failed_result_encourages_retry() {
        let result = GameResult {
            summary: SessionSummary::new(1, 3, PassThreshold::default()),
            reward: Reward {
                coins: 5,
                xp: 33,
                badge: None,
            },
        };
        let vm = map_result(&result);
        assert!(!vm.passed);
        assert_eq!(vm.score, "1 / 3");
        assert_eq!(vm.headline, "Good try! Practice makes perfect.");
    }
}
