//! Startup settings.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file,
//! environment variables (after `.env` is loaded), command-line flags.
//! Clap reads each flag's variable itself, so "environment then flags"
//! collapses into one parsed `Cli`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use backend::HttpConfig;
use clap::{Parser, ValueEnum};
use csr_core::game::{Pacing, PassThreshold, PassThresholdError, RewardConfig, RewardOverrides};
use serde::Deserialize;
use services::GameSettings;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "csr-learn.toml";
pub const DEFAULT_WINDOW_TITLE: &str = "CSR Learn";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    PassThreshold(#[from] PassThresholdError),

    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Talk to the admin REST backend.
    #[default]
    Http,
    /// Seeded in-process data; no network.
    Offline,
}

#[derive(Debug, Parser)]
#[command(name = "csr-learn", version, about = "CSR program console and learning games")]
pub struct Cli {
    /// TOML settings file.
    #[arg(long, env = "CSR_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, env = "CSR_MODE")]
    pub mode: Option<Mode>,

    /// Admin API base URL.
    #[arg(long, env = "CSR_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token forwarded with every request.
    #[arg(long, env = "CSR_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "CSR_API_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Game library file replacing the built-in games.
    #[arg(long, env = "CSR_GAME_LIBRARY")]
    pub game_library: Option<PathBuf>,

    /// Percentage needed to pass a game.
    #[arg(long, env = "CSR_PASS_PERCENT")]
    pub pass_percent: Option<u8>,

    /// Folder for downloaded reports.
    #[arg(long, env = "CSR_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    #[arg(long, env = "CSR_WINDOW_TITLE")]
    pub window_title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<Mode>,
    pub window_title: Option<String>,
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub games: GamesSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GamesSection {
    pub library: Option<PathBuf>,
    pub pass_percent: Option<u8>,
    pub rewards: Option<RewardOverrides>,
    #[serde(default)]
    pub pacing: PacingSection,
}

/// Pacing delays in milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacingSection {
    pub correct_advance_ms: Option<u64>,
    pub incorrect_advance_ms: Option<u64>,
    pub feedback_clear_ms: Option<u64>,
}

impl PacingSection {
    fn apply(&self, base: Pacing) -> Pacing {
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map_or(fallback, Duration::from_millis)
        };
        Pacing {
            correct_advance: ms(self.correct_advance_ms, base.correct_advance),
            incorrect_advance: ms(self.incorrect_advance_ms, base.incorrect_advance),
            feedback_clear: ms(self.feedback_clear_ms, base.feedback_clear),
        }
    }
}

impl FileConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `explicit`, or the default file if it exists.
    ///
    /// # Errors
    ///
    /// An explicitly named file must exist; the default one may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        match std::fs::read_to_string(&path) {
            Ok(raw) => Self::from_toml_str(&raw, &path).map(Some),
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}

/// Fully resolved settings handed to the composition root.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub http: HttpConfig,
    pub library_path: Option<PathBuf>,
    pub games: GameSettings,
    pub download_dir: Option<PathBuf>,
    pub window_title: String,
}

impl Settings {
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or a
    /// value is out of range.
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let file = FileConfig::load(cli.config.as_deref())?.unwrap_or_default();
        Self::resolve(cli, file)
    }

    /// Layers `cli` over `file` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid pass percent or a zero timeout.
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = HttpConfig::default();
        let timeout = match cli.timeout_secs.or(file.api.timeout_secs) {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.timeout,
        };
        let http = HttpConfig {
            base_url: cli
                .api_url
                .or(file.api.base_url)
                .unwrap_or(defaults.base_url),
            token: cli.api_token.or(file.api.token).filter(|t| !t.trim().is_empty()),
            timeout,
        };

        let pass_threshold = match cli.pass_percent.or(file.games.pass_percent) {
            Some(percent) => PassThreshold::new(percent)?,
            None => PassThreshold::default(),
        };
        let games = GameSettings {
            rewards: file
                .games
                .rewards
                .as_ref()
                .map_or_else(RewardConfig::default, |o| RewardConfig::default().with_overrides(o)),
            pacing: file.games.pacing.apply(Pacing::default()),
            pass_threshold,
        };

        Ok(Self {
            mode: cli.mode.or(file.mode).unwrap_or_default(),
            http,
            library_path: cli.game_library.or(file.games.library),
            games,
            download_dir: cli.download_dir.or(file.download_dir),
            window_title: cli
                .window_title
                .or(file.window_title)
                .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["csr-learn"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn file(raw: &str) -> FileConfig {
        FileConfig::from_toml_str(raw, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let settings = Settings::resolve(cli(&[]), FileConfig::default()).unwrap();
        assert_eq!(settings.mode, Mode::Http);
        assert_eq!(settings.http.base_url, "http://localhost:5000/api");
        assert_eq!(settings.http.timeout, Duration::from_secs(30));
        assert_eq!(settings.games, GameSettings::default());
        assert_eq!(settings.window_title, DEFAULT_WINDOW_TITLE);
        assert!(settings.library_path.is_none());
    }

    #[test]
    fn flags_override_file_values() {
        let file = file(
            r#"
            mode = "http"
            window_title = "From file"

            [api]
            base_url = "https://csr.example/api"
            timeout_secs = 10
            "#,
        );
        let settings = Settings::resolve(
            cli(&["--mode", "offline", "--api-url", "https://flag.example/api"]),
            file,
        )
        .unwrap();
        assert_eq!(settings.mode, Mode::Offline);
        assert_eq!(settings.http.base_url, "https://flag.example/api");
        assert_eq!(settings.http.timeout, Duration::from_secs(10));
        assert_eq!(settings.window_title, "From file");
    }

    #[test]
    fn game_tuning_comes_from_file() {
        let file = file(
            r#"
            [games]
            pass_percent = 75

            [games.rewards]
            coins_per_level = 10

            [games.pacing]
            correct_advance_ms = 500
            "#,
        );
        let settings = Settings::resolve(cli(&[]), file).unwrap();
        assert_eq!(settings.games.pass_threshold.percent(), 75);
        assert_eq!(settings.games.rewards.coins_per_level, 10);
        assert_eq!(
            settings.games.rewards.total_coins,
            RewardConfig::default().total_coins
        );
        assert_eq!(settings.games.pacing.correct_advance, Duration::from_millis(500));
        assert_eq!(
            settings.games.pacing.incorrect_advance,
            Pacing::default().incorrect_advance
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            Settings::resolve(cli(&["--pass-percent", "0"]), FileConfig::default()),
            Err(ConfigError::PassThreshold(_))
        ));
        assert!(matches!(
            Settings::resolve(cli(&["--timeout-secs", "0"]), FileConfig::default()),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn unknown_keys_are_a_parse_error() {
        let err = FileConfig::from_toml_str("colour = \"blue\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn explicit_missing_file_is_an_error_but_default_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            FileConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));

        let present = dir.path().join("csr.toml");
        std::fs::write(&present, "window_title = \"Lab\"\n").unwrap();
        let loaded = FileConfig::load(Some(&present)).unwrap().unwrap();
        assert_eq!(loaded.window_title.as_deref(), Some("Lab"));
    }
}
