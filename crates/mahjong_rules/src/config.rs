//! Per-game settings.

use derive_getters::Getters;
use derive_setters::Setters;
use mahjong_driver::Seat;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Settings a single game is created with.
///
/// Every field has a default, so an empty TOML table deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Ceiling on consecutive action-less states in one transition.
    transition_limit: usize,
    /// Seat whose wind drives prevalent wind changes and the end of the game.
    round_reference_seat: Seat,
    /// Seed for the tile draws. Drawn from the OS when absent.
    #[setters(strip_option)]
    seed: Option<u64>,
}

#[instrument]
fn default_transition_limit() -> usize {
    10
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            transition_limit: default_transition_limit(),
            round_reference_seat: Seat::Fourth,
            seed: None,
        }
    }
}
