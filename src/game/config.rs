use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Round index of the first traditional round; its engine is the double-12
pub const TRADITIONAL_FIRST_ROUND: i32 = 12;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("player count must be between {} and {}, got {0}", MIN_PLAYERS, MAX_PLAYERS)]
    PlayerCount(usize),
    #[error("quick mode needs at least one round")]
    NoRounds,
}

/// How rounds are counted and how each round's engine double is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Thirteen rounds, engine double-12 down to double-0
    Traditional,
    /// A fixed number of rounds, each with a random engine double
    Quick { total_rounds: u32 },
}

/// Settings chosen before a game starts. Seat 0 is the human player,
/// every other seat is a computer opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub player_count: usize,
}

impl GameConfig {
    pub fn traditional(player_count: usize) -> Self {
        GameConfig {
            mode: GameMode::Traditional,
            player_count,
        }
    }

    pub fn quick(player_count: usize, total_rounds: u32) -> Self {
        GameConfig {
            mode: GameMode::Quick { total_rounds },
            player_count,
        }
    }

    /// Load a config from a JSON file and validate it
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if let GameMode::Quick { total_rounds: 0 } = self.mode {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }
}
