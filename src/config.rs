use crate::consts;
use crate::highscores::{HighScores, LoadError, SaveError};
use crate::options::Options;
use ratatui::style::Style;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct Config {
    /// Default gameplay options at startup
    #[serde(default)]
    pub(crate) options: Options,

    /// Gameplay rule tweaks
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Style overrides for the playfield
    #[serde(default)]
    pub(crate) theme: Theme,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("wyrmhole").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which high scores should be stored: the file
    /// given in the configuration or, if that is not set, the default
    /// high-scores file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn scores_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .scores_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| HighScores::default_path().map(Cow::from))
    }

    /// Load the high-score table from its file.  A missing file yields the
    /// seeded default table.
    pub(crate) fn load_scores(&self) -> Result<HighScores, LoadError> {
        if let Some(p) = self.scores_file() {
            HighScores::load(&p)
        } else {
            Err(LoadError::no_path())
        }
    }

    /// Save the high-score table to its file.
    ///
    /// If `self.files.save_scores` is `false`, nothing is saved.
    pub(crate) fn save_scores(&self, scores: &HighScores) -> Result<(), SaveError> {
        if !self.files.save_scores {
            return Ok(());
        }
        if let Some(p) = self.scores_file() {
            scores.save(&p)
        } else {
            Err(SaveError::no_path())
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Whether food and elixir placement must also avoid each other's cells
    pub(crate) distinct_pickups: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    scores_file: Option<PathBuf>,

    /// Whether to save high scores to a file
    save_scores: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            scores_file: None,
            save_scores: true,
        }
    }
}

/// Optional per-element style overrides, given in the configuration file
/// as strings like `"bold green"`.  Anything not overridden falls back to
/// the built-in styles in [`consts`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawTheme")]
pub(crate) struct Theme {
    snake: Option<Style>,
    wyrm: Option<Style>,
    food: Option<Style>,
    special_food: Option<Style>,
    wizard: Option<Style>,
    elixir: Option<Style>,
}

impl Theme {
    pub(crate) fn snake(&self) -> Style {
        self.snake.unwrap_or(consts::SNAKE_STYLE)
    }

    pub(crate) fn wyrm(&self) -> Style {
        self.wyrm.unwrap_or(consts::WYRM_STYLE)
    }

    /// Style for a normal food item; `pulse` selects the bright or dim
    /// half of the pulse cycle.  An override suppresses the pulse.
    pub(crate) fn food(&self, pulse: usize) -> Style {
        self.food.unwrap_or(consts::FOOD_STYLES[pulse])
    }

    pub(crate) fn special_food(&self, pulse: usize) -> Style {
        self.special_food.unwrap_or(consts::SPECIAL_FOOD_STYLES[pulse])
    }

    pub(crate) fn wizard(&self) -> Style {
        self.wizard.unwrap_or(consts::WIZARD_STYLE)
    }

    pub(crate) fn elixir(&self) -> Style {
        self.elixir.unwrap_or(consts::ELIXIR_STYLE)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawTheme {
    snake: Option<String>,
    wyrm: Option<String>,
    food: Option<String>,
    special_food: Option<String>,
    wizard: Option<String>,
    elixir: Option<String>,
}

impl TryFrom<RawTheme> for Theme {
    type Error = ThemeError;

    fn try_from(value: RawTheme) -> Result<Theme, ThemeError> {
        Ok(Theme {
            snake: parse_theme_style("snake", value.snake)?,
            wyrm: parse_theme_style("wyrm", value.wyrm)?,
            food: parse_theme_style("food", value.food)?,
            special_food: parse_theme_style("special-food", value.special_food)?,
            wizard: parse_theme_style("wizard", value.wizard)?,
            elixir: parse_theme_style("elixir", value.elixir)?,
        })
    }
}

fn parse_theme_style(
    key: &'static str,
    value: Option<String>,
) -> Result<Option<Style>, ThemeError> {
    value
        .map(|s| {
            s.parse::<parse_style::Style>()
                .map(Style::from)
                .map_err(|_| ThemeError { key, value: s })
        })
        .transpose()
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid style {value:?} for theme key {key:?}")]
pub(crate) struct ThemeError {
    key: &'static str,
    value: String,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use pretty_assertions::assert_eq;
    use ratatui::style::{Color, Modifier};

    #[test]
    fn test_empty_source_is_the_default() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.game.distinct_pickups);
        assert!(config.files.save_scores);
    }

    #[test]
    fn test_full_source() {
        let src = concat!(
            "[options]\n",
            "difficulty = \"hard\"\n",
            "sound = false\n",
            "\n",
            "[game]\n",
            "distinct-pickups = true\n",
            "\n",
            "[files]\n",
            "scores-file = \"/tmp/scores.json\"\n",
            "save-scores = false\n",
        );
        let config = toml::from_str::<Config>(src).unwrap();
        assert_eq!(config.options.difficulty, Difficulty::Hard);
        assert!(!config.options.sound);
        assert!(config.game.distinct_pickups);
        assert_eq!(
            config.files.scores_file,
            Some(PathBuf::from("/tmp/scores.json"))
        );
        assert!(!config.files.save_scores);
    }

    #[test]
    fn test_theme_overrides_and_fallbacks() {
        let src = "[theme]\nsnake = \"bold green\"\nelixir = \"magenta\"\n";
        let config = toml::from_str::<Config>(src).unwrap();
        assert_eq!(
            config.theme.snake(),
            Style::new().fg(Color::Green).add_modifier(Modifier::BOLD)
        );
        assert_eq!(config.theme.elixir(), Style::new().fg(Color::Magenta));
        assert_eq!(config.theme.wizard(), consts::WIZARD_STYLE);
        assert_eq!(config.theme.food(0), consts::FOOD_STYLES[0]);
    }

    #[test]
    fn test_bad_theme_style_is_a_parse_error() {
        let src = "[theme]\nsnake = \"chartreuse-ish\"\n";
        let e = toml::from_str::<Config>(src).unwrap_err();
        assert!(e.to_string().contains("invalid style"), "{e}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load(&path, true).unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::load(&path, false).is_err());
    }

    #[test]
    fn test_load_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "[options]\ndifficulty = \"impossible\"\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_scores_honors_the_switch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let src = format!(
            "[files]\nscores-file = {path:?}\nsave-scores = false\n",
            path = path.display().to_string()
        );
        let config = toml::from_str::<Config>(&src).unwrap();
        config.save_scores(&HighScores::default()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_scores_roundtrip_through_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let src = format!(
            "[files]\nscores-file = {path:?}\n",
            path = path.display().to_string()
        );
        let config = toml::from_str::<Config>(&src).unwrap();
        let scores = HighScores::default();
        config.save_scores(&scores).unwrap();
        assert!(path.exists());
        assert_eq!(config.load_scores().unwrap(), scores);
    }
}
