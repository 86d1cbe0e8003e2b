//! Application configuration: TOML file, then environment, then CLI.

use derive_getters::Getters;
use derive_more::{Display, Error};
use mahjong_driver::Seat;
use mahjong_rules::GameConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Overrides the transition limit.
pub const ENV_TRANSITION_LIMIT: &str = "MAHJONG_TRANSITION_LIMIT";
/// Overrides the draw seed.
pub const ENV_SEED: &str = "MAHJONG_SEED";
/// Overrides the round reference seat (index 0-3).
pub const ENV_REFERENCE_SEAT: &str = "MAHJONG_REFERENCE_SEAT";

/// Everything the binary can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Settings for each game created.
    game: GameConfig,
    /// Settings for random play.
    simulation: SimulationConfig,
}

/// Settings for the random-play simulator.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of games to play.
    games: usize,
    /// Give up on a game after this many transitions.
    max_transitions: usize,
}

#[instrument]
fn default_games() -> usize {
    1
}

#[instrument]
fn default_max_transitions() -> usize {
    10_000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: default_games(),
            max_transitions: default_max_transitions(),
        }
    }
}

impl SimulationConfig {
    /// Creates simulator settings.
    pub fn new(games: usize, max_transitions: usize) -> Self {
        Self {
            games,
            max_transitions,
        }
    }
}

impl AppConfig {
    /// Creates a configuration from its parts.
    pub fn new(game: GameConfig, simulation: SimulationConfig) -> Self {
        Self { game, simulation }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            games = config.simulation.games,
            transition_limit = config.game.transition_limit(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Applies the `MAHJONG_*` environment variables.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Unset variables leave the field alone; set but unparsable ones fail.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_TRANSITION_LIMIT) {
            let limit = parse_number(ENV_TRANSITION_LIMIT, &value)?;
            self.game = self.game.with_transition_limit(limit);
        }

        if let Some(value) = lookup(ENV_SEED) {
            let seed = parse_number(ENV_SEED, &value)?;
            self.game = self.game.with_seed(seed);
        }

        if let Some(value) = lookup(ENV_REFERENCE_SEAT) {
            let seat = parse_seat(&value)?;
            self.game = self.game.with_round_reference_seat(seat);
        }

        debug!(game = ?self.game, "Overrides applied");
        Ok(self)
    }

    /// Replaces the game settings.
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Replaces the simulator settings.
    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N, ConfigError>
where
    N::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::new(format!("Invalid {} '{}': {}", key, value, e)))
}

/// Parses a seat index (0-3).
pub fn parse_seat(value: &str) -> Result<Seat, ConfigError> {
    let index: usize = parse_number(ENV_REFERENCE_SEAT, value)?;
    Seat::from_index(index)
        .ok_or_else(|| ConfigError::new(format!("Seat index {} is out of range 0-3", index)))
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
