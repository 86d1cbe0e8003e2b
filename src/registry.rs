//! In-memory registry of running games.

use derive_more::{Display, Error};
use mahjong_rules::{GameConfig, MahjongGame};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

/// Identifier handed out by [`GameRegistry::start_new`].
pub type GameId = u64;

/// Games keyed by id.
///
/// The map lock is only held to look games up. Each game serializes its own
/// transitions, so games never wait on each other.
#[derive(Debug)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, Arc<MahjongGame>>>,
    next_id: AtomicU64,
}

impl GameRegistry {
    /// Creates an empty registry. The first game gets id 1.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game registry");
        Self {
            games: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a game, deals it and stores it under a fresh id.
    #[instrument(skip(self, config))]
    pub fn start_new(&self, config: &GameConfig) -> Result<GameId, RegistryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let game = MahjongGame::new(config).map_err(|e| {
            warn!(game_id = id, error = %e, "Game failed to start");
            RegistryError::new(format!("Failed to start game {}: {}", id, e))
        })?;

        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(game));

        info!(game_id = id, "Started new game");
        Ok(id)
    }

    /// Looks up a game.
    #[instrument(skip(self))]
    pub fn get(&self, id: GameId) -> Result<Arc<MahjongGame>, RegistryError> {
        let games = self.games.read().unwrap_or_else(PoisonError::into_inner);
        games.get(&id).cloned().ok_or_else(|| {
            debug!(game_id = id, "Game not found");
            RegistryError::new(format!("Game {} not found", id))
        })
    }

    /// Ids of every stored game, ascending.
    pub fn list(&self) -> Vec<GameId> {
        let games = self.games.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<GameId> = games.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drops a game. Callers still holding it keep a working handle.
    #[instrument(skip(self))]
    pub fn remove(&self, id: GameId) -> Result<(), RegistryError> {
        let removed = self
            .games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);

        match removed {
            Some(_) => {
                info!(game_id = id, "Removed game");
                Ok(())
            }
            None => Err(RegistryError::new(format!("Game {} not found", id))),
        }
    }

    /// Number of games ever started, including removed and failed ones.
    pub fn games_started(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst) - 1
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry error.
#[derive(Debug, Clone, Display, Error)]
#[display("Registry error: {} at {}:{}", message, file, line)]
pub struct RegistryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RegistryError {
    /// Creates a new registry error.
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
