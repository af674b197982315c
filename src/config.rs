use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::flashcards::FlashcardConfig;
use crate::game::{default_roster, BoardConfig, Player, PlayerId, WIN_LENGTH};
use crate::round::{validate_time_limit, RoundConfig};

/// A roster entry in the config file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub color: String,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub round: RoundConfig,
    pub flashcards: FlashcardConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<PlayerEntry>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows < WIN_LENGTH && self.board.cols < WIN_LENGTH {
            return Err(ConfigError::Validation(format!(
                "board must have at least {WIN_LENGTH} rows or {WIN_LENGTH} columns"
            )));
        }
        if self.board.rows == 0 || self.board.cols == 0 {
            return Err(ConfigError::Validation(
                "board.rows and board.cols must be > 0".into(),
            ));
        }
        if self.board.players < 2 {
            return Err(ConfigError::Validation(
                "board.players must be >= 2".into(),
            ));
        }
        if !self.players.is_empty() && self.players.len() != usize::from(self.board.players) {
            return Err(ConfigError::Validation(format!(
                "players lists {} entries but board.players is {}",
                self.players.len(),
                self.board.players
            )));
        }

        validate_time_limit(self.round.time_limit_secs)
            .map_err(|e| ConfigError::Validation(format!("round.time_limit_secs: {e}")))?;
        if self.round.tick_millis == 0 {
            return Err(ConfigError::Validation(
                "round.tick_millis must be > 0".into(),
            ));
        }

        if self.flashcards.words_per_page == 0 {
            return Err(ConfigError::Validation(
                "flashcards.words_per_page must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// The roster to seat: configured entries, or the default colors.
    pub fn roster(&self) -> Vec<Player> {
        if self.players.is_empty() {
            return default_roster(self.board.players);
        }
        (1..=u8::MAX)
            .zip(&self.players)
            .map(|(id, entry)| Player {
                id: PlayerId(id),
                name: entry.name.clone(),
                color: entry.color.clone(),
            })
            .collect()
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
