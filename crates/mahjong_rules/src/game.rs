//! A single game: one table driven by the turn engine.

use crate::{GameConfig, MahjongAction, Step, Table, TableSnapshot, state};
use mahjong_driver::{Driver, DriverError, SeatActions, Selection, State};
use tracing::{info, instrument};

/// A mahjong game behind its own driver lock.
#[derive(Debug)]
pub struct MahjongGame {
    driver: Driver<Step>,
}

impl MahjongGame {
    /// Creates a game and deals it up to the first decision.
    ///
    /// # Errors
    ///
    /// Returns the driver error if dealing fails.
    #[instrument(skip(config), fields(seed = ?config.seed()))]
    pub fn new(config: &GameConfig) -> Result<Self, DriverError> {
        let table = Table::new(*config.seed())
            .with_round_reference_seat(*config.round_reference_seat());
        let driver = Driver::new(state::new_game(), table, *config.transition_limit());

        driver.transition(&Selection::new())?;
        info!(state = driver.state_name(), "Game created");

        Ok(Self { driver })
    }

    /// Name of the current state.
    pub fn state_name(&self) -> &'static str {
        self.driver.state_name()
    }

    /// Whether the game is over.
    pub fn has_terminated(&self) -> bool {
        self.driver.has_terminated()
    }

    /// Whether some seat must choose before play continues.
    pub fn requires_actions(&self) -> bool {
        self.driver.requires_actions()
    }

    /// Menus per seat in their stable order.
    pub fn available_actions(&self) -> SeatActions<MahjongAction> {
        self.driver.available_actions()
    }

    /// Applies one round of selections. See [`Driver::transition`].
    pub fn transition(&self, selection: &Selection) -> Result<(), DriverError> {
        self.driver.transition(selection)
    }

    /// Copy of the table as of the current state.
    pub fn snapshot(&self) -> TableSnapshot {
        self.driver.inspect(|_, table| table.snapshot())
    }

    /// Tiles accounted for on the table. Always 144.
    pub fn tile_count(&self) -> usize {
        self.driver.inspect(|_, table| table.tile_count())
    }

    /// Ceiling on consecutive action-less states per transition.
    pub fn transition_limit(&self) -> usize {
        self.driver.transition_limit()
    }

    /// Reads the current state and table together.
    pub fn inspect<R>(&self, f: impl FnOnce(&State<Step>, &Table) -> R) -> R {
        self.driver.inspect(f)
    }
}
