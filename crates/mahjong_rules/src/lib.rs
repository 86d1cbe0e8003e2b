//! Mahjong turn engine.
//!
//! Tiles, hands and the table, plus the graph of states that deals, takes
//! draws and discards, and resolves competing claims. Games run on the
//! generic [`mahjong_driver::Driver`].
//!
//! ```
//! use mahjong_rules::{GameConfig, MahjongGame};
//!
//! let game = MahjongGame::new(&GameConfig::default().with_seed(7)).unwrap();
//! assert_eq!(game.state_name(), "Must Discard");
//! assert_eq!(game.tile_count(), 144);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod collection;
mod combination;
mod config;
mod game;
mod player;
pub mod scoring;
pub mod state;
mod table;
mod tile;

pub use action::MahjongAction;
pub use collection::TileCollection;
pub use combination::{Combination, CombinationCollection};
pub use config::GameConfig;
pub use game::MahjongGame;
pub use player::{Player, possible_chows};
pub use state::Step;
pub use table::{DEAD_WALL_SIZE, HAND_SIZE, Table, TableSnapshot};
pub use tile::{Suit, Tile, Wind};

/// Number of tiles in a full set.
pub const TILE_SET_SIZE: usize = 144;
