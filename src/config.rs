use crate::consts;
use crate::engine::Grid;
use ratatui::style::Style;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Board geometry and game pacing
    pub(crate) game: GameConfig,

    /// Colors & text attributes for the board glyphs
    pub(crate) theme: Theme,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("copperhead").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist
    /// and `allow_missing` is true, a default `Config` value is returned.
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
}

/// The immutable parameters a [`crate::engine::GameEngine`] is built from.
/// Defaults come from [`crate::consts`]; a config file may override them
/// within the limits enforced by the `RawGameConfig` conversion.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    pub(crate) columns: u16,
    pub(crate) rows: u16,
    pub(crate) initial_length: usize,
    pub(crate) frame_divider: u32,
    pub(crate) bonus_interval: u32,
    pub(crate) min_safe_length: usize,
}

impl GameConfig {
    pub(crate) fn grid(self) -> Grid {
        Grid::new(i32::from(self.rows), i32::from(self.columns))
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            columns: consts::GRID_COLUMNS,
            rows: consts::GRID_ROWS,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            frame_divider: consts::FRAME_DIVIDER,
            bonus_interval: consts::BONUS_INTERVAL,
            min_safe_length: consts::MIN_SAFE_LENGTH,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    columns: u16,
    rows: u16,
    initial_length: usize,
    speed: u32,
    bonus_interval: u32,
    min_safe_length: usize,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        RawGameConfig {
            columns: consts::GRID_COLUMNS,
            rows: consts::GRID_ROWS,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            speed: consts::FRAME_DIVIDER,
            bonus_interval: consts::BONUS_INTERVAL,
            min_safe_length: consts::MIN_SAFE_LENGTH,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = InvalidConfig;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, InvalidConfig> {
        let min_dim = u16::try_from(consts::FOOD_SPAWN_MARGIN * 2 + 1)
            .expect("the food margin is a small constant");
        if value.columns < min_dim || value.rows < min_dim {
            return Err(InvalidConfig(format!(
                "the board must be at least {min_dim}x{min_dim}"
            )));
        }
        if value.columns > consts::GRID_COLUMNS || value.rows > consts::GRID_ROWS {
            return Err(InvalidConfig(format!(
                "the board must fit the {}x{} display (at most {}x{})",
                consts::DISPLAY_SIZE.width,
                consts::DISPLAY_SIZE.height,
                consts::GRID_COLUMNS,
                consts::GRID_ROWS,
            )));
        }
        if value.initial_length < consts::MIN_SAFE_LENGTH {
            return Err(InvalidConfig(format!(
                "initial-length must be at least {}",
                consts::MIN_SAFE_LENGTH
            )));
        }
        if value.initial_length > usize::from(value.rows) {
            return Err(InvalidConfig(String::from(
                "initial-length cannot exceed the number of rows",
            )));
        }
        if value.speed == 0 {
            return Err(InvalidConfig(String::from("speed must be at least 1")));
        }
        if value.bonus_interval == 0 {
            return Err(InvalidConfig(String::from(
                "bonus-interval must be at least 1",
            )));
        }
        if value.min_safe_length < consts::MIN_SAFE_LENGTH {
            return Err(InvalidConfig(format!(
                "min-safe-length must be at least {}",
                consts::MIN_SAFE_LENGTH
            )));
        }
        Ok(GameConfig {
            columns: value.columns,
            rows: value.rows,
            initial_length: value.initial_length,
            frame_divider: value.speed,
            bonus_interval: value.bonus_interval,
            min_safe_length: value.min_safe_length,
        })
    }
}

/// Styles for the board glyphs, given in the config file as strings like
/// `"bold green"`
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "RawTheme")]
pub(crate) struct Theme {
    pub(crate) snake: Style,
    pub(crate) food: Style,
    pub(crate) bonus_food: Style,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            snake: consts::SNAKE_STYLE,
            food: consts::FOOD_STYLE,
            bonus_food: consts::BONUS_FOOD_STYLE,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawTheme {
    snake: Option<parse_style::Style>,
    food: Option<parse_style::Style>,
    bonus_food: Option<parse_style::Style>,
}

impl From<RawTheme> for Theme {
    fn from(value: RawTheme) -> Theme {
        Theme {
            snake: value.snake.map_or(consts::SNAKE_STYLE, Style::from),
            food: value.food.map_or(consts::FOOD_STYLE, Style::from),
            bonus_food: value.bonus_food.map_or(consts::BONUS_FOOD_STYLE, Style::from),
        }
    }
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

#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct InvalidConfig(String);
