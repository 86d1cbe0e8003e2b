//! Random play, for exercising the engine end to end.

use crate::config::SimulationConfig;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use mahjong_driver::{SeatActions, Selection};
use mahjong_rules::{GameConfig, MahjongAction, MahjongGame, TILE_SET_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

/// Outcome of one randomly played game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, new)]
pub struct SimulationReport {
    /// Transitions applied.
    transitions: usize,
    /// Name of the state play stopped in.
    final_state: String,
    /// Whether the game reached its terminal state.
    terminated: bool,
}

/// Picks a uniformly random index on every menu.
pub fn random_selection<R: Rng>(actions: &SeatActions<MahjongAction>, rng: &mut R) -> Selection {
    actions
        .iter()
        .filter(|(_, menu)| !menu.is_empty())
        .map(|(&seat, menu)| (seat, rng.random_range(0..menu.len())))
        .collect()
}

/// Applies one random selection and checks tile conservation afterwards.
pub fn step_random<R: Rng>(game: &MahjongGame, rng: &mut R) -> Result<(), SimulationError> {
    let selection = random_selection(&game.available_actions(), rng);
    debug!(state = game.state_name(), selection = ?selection, "Random step");

    game.transition(&selection)
        .map_err(|e| SimulationError::new(format!("Transition failed: {}", e)))?;

    let tiles = game.tile_count();
    if tiles != TILE_SET_SIZE {
        error!(tiles, state = game.state_name(), "Tile count drifted");
        return Err(SimulationError::new(format!(
            "Incorrect tile count [{}] in state {}",
            tiles,
            game.state_name()
        )));
    }

    Ok(())
}

/// Plays `game` with random choices until it ends.
///
/// # Errors
///
/// Fails on any driver error and on a tile count other than 144. A game
/// still running after `max_transitions` is reported as not terminated.
#[instrument(skip(game, rng))]
pub fn play_random<R: Rng>(
    game: &MahjongGame,
    rng: &mut R,
    max_transitions: usize,
) -> Result<SimulationReport, SimulationError> {
    let mut transitions = 0;

    while !game.has_terminated() {
        if transitions >= max_transitions {
            warn!(transitions, state = game.state_name(), "Transition budget exhausted");
            return Ok(SimulationReport::new(
                transitions,
                game.state_name().to_string(),
                false,
            ));
        }

        step_random(game, rng).map_err(|e| {
            SimulationError::new(format!("After {} transitions: {}", transitions, e.message))
        })?;
        transitions += 1;
    }

    info!(transitions, "Game ended");
    Ok(SimulationReport::new(
        transitions,
        game.state_name().to_string(),
        true,
    ))
}

/// Plays `simulation.games()` fresh games.
///
/// With a seed in `game`, game `i` is dealt with `seed + i` and its choices
/// drawn from the same seed, so whole runs replay exactly.
#[instrument(skip(game, simulation))]
pub fn run_simulations(
    game: &GameConfig,
    simulation: &SimulationConfig,
) -> Result<Vec<SimulationReport>, SimulationError> {
    (0..*simulation.games())
        .map(|i| {
            let seed = game.seed().map(|s| s.wrapping_add(i as u64));
            let config = match seed {
                Some(seed) => game.clone().with_seed(seed),
                None => game.clone(),
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            let instance = MahjongGame::new(&config)
                .map_err(|e| SimulationError::new(format!("Game {} failed to start: {}", i, e)))?;
            play_random(&instance, &mut rng, *simulation.max_transitions())
        })
        .collect()
}

/// Simulation error.
#[derive(Debug, Clone, Display, Error)]
#[display("Simulation error: {} at {}:{}", message, file, line)]
pub struct SimulationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SimulationError {
    /// Creates a new simulation error.
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
