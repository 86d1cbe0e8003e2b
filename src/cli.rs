//! Command-line interface for mahjong_learn.

use crate::config::{AppConfig, ConfigError, SimulationConfig, parse_seat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mahjong Learn - turn engine driven from the command line
#[derive(Parser, Debug)]
#[command(name = "mahjong_learn")]
#[command(about = "Plays and inspects mahjong games on the turn engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for tile draws and random choices
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Ceiling on consecutive action-less states per transition
    #[arg(long, global = true)]
    pub transition_limit: Option<usize>,

    /// Seat index (0-3) whose wind drives the end of the game
    #[arg(long, global = true)]
    pub reference_seat: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play games to the end with random choices
    Simulate {
        /// Number of games to play
        #[arg(short, long)]
        games: Option<usize>,

        /// Give up on a game after this many transitions
        #[arg(long)]
        max_transitions: Option<usize>,
    },

    /// Advance a fresh game by random choices and print its JSON view
    Inspect {
        /// Number of random transitions to apply
        #[arg(short, long, default_value = "0")]
        steps: usize,
    },
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, config: AppConfig) -> Result<AppConfig, ConfigError> {
        let mut game = config.game().clone();
        if let Some(seed) = self.seed {
            game = game.with_seed(seed);
        }
        if let Some(limit) = self.transition_limit {
            game = game.with_transition_limit(limit);
        }
        if let Some(seat) = &self.reference_seat {
            game = game.with_round_reference_seat(parse_seat(seat)?);
        }

        let mut simulation = config.simulation().clone();
        if let Command::Simulate {
            games,
            max_transitions,
        } = &self.command
        {
            simulation = SimulationConfig::new(
                games.unwrap_or(*simulation.games()),
                max_transitions.unwrap_or(*simulation.max_transitions()),
            );
        }

        Ok(config.with_game(game).with_simulation(simulation))
    }
}
