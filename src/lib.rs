//! Mahjong Learn library - application glue around the mahjong turn engine
//!
//! # Architecture
//!
//! - **Config**: TOML file, `MAHJONG_*` environment overrides, CLI overrides
//! - **Registry**: in-memory store of running games keyed by id
//! - **View**: JSON-ready projection of a game for rendering
//! - **Simulation**: random play with tile conservation checks
//!
//! # Example
//!
//! ```
//! use mahjong_learn::{GameRegistry, GameView};
//! use mahjong_rules::GameConfig;
//!
//! let registry = GameRegistry::new();
//! let id = registry.start_new(&GameConfig::default().with_seed(1)).unwrap();
//! let view = GameView::of(&registry.get(id).unwrap());
//! assert_eq!(view.state_name(), "Must Discard");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod registry;
mod simulation;
mod view;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{
    AppConfig, ConfigError, ENV_REFERENCE_SEAT, ENV_SEED, ENV_TRANSITION_LIMIT, SimulationConfig,
    parse_seat,
};

// Crate-level exports - Game registry
pub use registry::{GameId, GameRegistry, RegistryError};

// Crate-level exports - Simulation
pub use simulation::{
    SimulationError, SimulationReport, play_random, random_selection, run_simulations, step_random,
};

// Crate-level exports - Views
pub use view::{GameView, NO_TILE, PlayerView};
