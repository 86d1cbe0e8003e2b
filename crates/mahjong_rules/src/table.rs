//! The table: wall, players and the mutations the turn engine applies.

use crate::{Combination, Player, Tile, TileCollection, Wind};
use derive_getters::Getters;
use mahjong_driver::{Seat, TransitionError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Tiles dealt into each concealed hand at the start of a round.
pub const HAND_SIZE: usize = 13;

/// A round ends once the wall shrinks to this many tiles.
pub const DEAD_WALL_SIZE: usize = 14;

/// All game data mutated by the turn engine.
///
/// Every mutator that could break tile conservation checks its
/// preconditions first and leaves the table untouched when they fail.
#[derive(Debug, Clone, Getters)]
pub struct Table {
    /// Round-level wind.
    prevalent_wind: Wind,
    /// Undrawn tiles.
    wall: TileCollection,
    /// Seat whose turn it is.
    active_seat: Seat,
    /// Tile just discarded by the active seat, awaiting reactions.
    active_discard: Option<Tile>,
    /// Players indexed by seat.
    players: [Player; Seat::COUNT],
    /// Seat whose wind decides when the prevalent wind advances and when
    /// the game ends.
    round_reference_seat: Seat,
    #[getter(skip)]
    rng: StdRng,
}

impl Table {
    /// Creates a table with a full wall and empty hands.
    ///
    /// A seed makes every draw reproducible; without one the generator is
    /// seeded from the operating system.
    #[instrument]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            prevalent_wind: Wind::East,
            wall: TileCollection::mahjong_set(),
            active_seat: Seat::First,
            active_discard: None,
            players: [
                Player::new(Wind::East),
                Player::new(Wind::South),
                Player::new(Wind::West),
                Player::new(Wind::North),
            ],
            round_reference_seat: Seat::Fourth,
            rng,
        }
    }

    /// Uses `seat` as the round reference seat instead of the fourth seat.
    pub fn with_round_reference_seat(mut self, seat: Seat) -> Self {
        self.round_reference_seat = seat;
        self
    }

    /// The player at `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> &Player {
        self.player(self.active_seat)
    }

    /// Seats that may react to the active seat's discard, in proximity order.
    pub fn reacting_seats(&self) -> [Seat; 3] {
        self.active_seat.others()
    }

    /// Tiles accounted for across the wall, every player and the pending
    /// discard. Always 144.
    pub fn tile_count(&self) -> usize {
        self.wall.size()
            + self.players.iter().map(Player::tile_count).sum::<usize>()
            + usize::from(self.active_discard.is_some())
    }

    /// A comparable, serializable copy of everything but the random source.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            prevalent_wind: self.prevalent_wind,
            wall: self.wall.clone(),
            active_seat: self.active_seat,
            active_discard: self.active_discard,
            players: self.players.clone(),
        }
    }

    /// Non-bonus tiles left in the wall.
    pub fn drawable_tiles(&self) -> usize {
        self.wall
            .iter()
            .filter(|(tile, _)| !tile.is_bonus())
            .map(|(_, count)| usize::from(count))
            .sum()
    }

    /// Fails unless `n` more non-bonus tiles can be drawn from the wall.
    pub fn ensure_drawable(&self, n: usize) -> Result<(), TransitionError> {
        let drawable = self.drawable_tiles();
        if drawable < n {
            return Err(TransitionError::new(format!(
                "cannot draw {} tiles, the wall holds {} non-bonus tiles",
                n, drawable
            )));
        }
        Ok(())
    }

    fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    fn active_player_mut(&mut self) -> &mut Player {
        self.player_mut(self.active_seat)
    }

    /// Draws until a non-bonus tile comes up, exposing every bonus tile
    /// drawn on the way to `seat`.
    ///
    /// Callers check [`Table::ensure_drawable`] first.
    fn draw_for(&mut self, seat: Seat) -> Result<Tile, TransitionError> {
        loop {
            let tile = self
                .wall
                .remove_random(&mut self.rng)
                .ok_or_else(|| TransitionError::new("cannot draw from an empty wall"))?;

            if !tile.is_bonus() {
                return Ok(tile);
            }

            trace!(%seat, %tile, "Bonus tile exposed");
            self.player_mut(seat)
                .exposed
                .add(Combination::BonusTile { tile });
        }
    }

    // ─── Dealing ────────────────────────────────────────────────────────

    /// Gives the active seat its next tile as the received tile.
    #[instrument(skip(self), fields(seat = %self.active_seat, wall = self.wall.size()))]
    pub fn deal_to_active_player(&mut self) -> Result<(), TransitionError> {
        if let Some(held) = self.active_player().received {
            return Err(TransitionError::new(format!(
                "seat {} still holds received tile {}",
                self.active_seat, held
            )));
        }

        self.ensure_drawable(1)?;
        let tile = self.draw_for(self.active_seat)?;
        debug!(%tile, "Dealt to active player");
        self.active_player_mut().received = Some(tile);
        Ok(())
    }

    /// Deals `n` non-bonus tiles into the concealed hand of `seat`.
    #[instrument(skip(self))]
    pub fn deal_concealed(&mut self, n: usize, seat: Seat) -> Result<(), TransitionError> {
        self.ensure_drawable(n)?;
        for _ in 0..n {
            let tile = self.draw_for(seat)?;
            self.player_mut(seat).concealed.add(tile);
        }
        Ok(())
    }

    /// Deals a starting hand to every seat.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> Result<(), TransitionError> {
        self.ensure_drawable(HAND_SIZE * Seat::COUNT)?;
        for seat in Seat::ALL {
            self.deal_concealed(HAND_SIZE, seat)?;
        }
        info!(wall = self.wall.size(), "Starting hands dealt");
        Ok(())
    }

    // ─── Rounds ─────────────────────────────────────────────────────────

    /// Advances the prevalent wind.
    pub fn next_prevalent_wind(&mut self) {
        self.prevalent_wind = self.prevalent_wind.next();
        info!(prevalent_wind = %self.prevalent_wind, "Prevalent wind advanced");
    }

    /// Replaces the wall with a fresh 144 tile set.
    pub fn reset_wall(&mut self) {
        self.wall = TileCollection::mahjong_set();
    }

    /// Clears every hand, rotates seat winds and deals new hands.
    ///
    /// Expects a freshly reset wall.
    #[instrument(skip(self))]
    pub fn prepare_next_round(&mut self) -> Result<(), TransitionError> {
        self.ensure_drawable(HAND_SIZE * Seat::COUNT)?;
        self.active_discard = None;
        for player in &mut self.players {
            player.received = None;
            player.discarded.empty();
            player.concealed.empty();
            player.exposed.empty();
            player.wind = player.wind.next();
        }
        for seat in Seat::ALL {
            self.deal_concealed(HAND_SIZE, seat)?;
        }
        Ok(())
    }

    /// Hands the turn to `seat`.
    pub fn activate_seat(&mut self, seat: Seat) {
        debug!(%seat, "Seat activated");
        self.active_seat = seat;
    }

    // ─── Answers to a draw ──────────────────────────────────────────────

    /// Exposes four copies of `tile` as a concealed kong.
    ///
    /// A received tile joins the concealed hand first, whether or not it is
    /// the fourth copy.
    #[instrument(skip(self), fields(seat = %self.active_seat))]
    pub fn declares_concealed_kong(&mut self, tile: Tile) -> Result<(), TransitionError> {
        let player = self.active_player();
        let held = player.concealed.count(tile) + u8::from(player.received == Some(tile));
        if held != 4 {
            return Err(TransitionError::new(format!(
                "concealed kong of {} needs four copies, seat {} holds {}",
                tile, self.active_seat, held
            )));
        }

        let player = self.active_player_mut();
        if let Some(received) = player.received.take() {
            player.concealed.add(received);
        }
        player.concealed.remove_all(tile);
        player.exposed.add(Combination::Kong {
            tile,
            concealed: true,
        });
        Ok(())
    }

    /// Upgrades the exposed pung matching the received tile to a kong.
    #[instrument(skip(self), fields(seat = %self.active_seat))]
    pub fn adds_to_exposed_pung(&mut self) -> Result<(), TransitionError> {
        let seat = self.active_seat;
        let player = self.active_player_mut();
        let received = player
            .received
            .ok_or_else(|| TransitionError::new(format!("seat {} has no received tile", seat)))?;

        let pung = Combination::Pung { tile: received };
        let kong = Combination::Kong {
            tile: received,
            concealed: false,
        };
        if !player.exposed.replace(&pung, kong) {
            return Err(TransitionError::new(format!(
                "seat {} has no exposed pung of {}",
                seat, received
            )));
        }

        player.received = None;
        Ok(())
    }

    /// Discards `tile`, from the received tile or the concealed hand.
    ///
    /// The received tile, if any, joins the concealed hand.
    #[instrument(skip(self), fields(seat = %self.active_seat))]
    pub fn discards(&mut self, tile: Tile) -> Result<(), TransitionError> {
        if let Some(pending) = self.active_discard {
            return Err(TransitionError::new(format!(
                "discard {} is still awaiting reactions",
                pending
            )));
        }

        let seat = self.active_seat;
        let player = self.active_player_mut();
        if player.received != Some(tile) && !player.concealed.contains(tile) {
            return Err(TransitionError::new(format!(
                "seat {} cannot discard {}, it is not held",
                seat, tile
            )));
        }

        if let Some(received) = player.received.take() {
            player.concealed.add(received);
        }
        player.concealed.remove(tile);
        self.active_discard = Some(tile);
        debug!(%tile, "Tile discarded");
        Ok(())
    }

    // ─── Answers to a discard ───────────────────────────────────────────

    fn pending_discard(&self) -> Result<Tile, TransitionError> {
        self.active_discard
            .ok_or_else(|| TransitionError::new("no discard is awaiting reactions"))
    }

    /// Moves the unclaimed discard onto the active seat's discard pile.
    pub fn takes_discarded(&mut self) -> Result<(), TransitionError> {
        let discard = self.pending_discard()?;
        self.active_player_mut().discarded.add(discard);
        self.active_discard = None;
        Ok(())
    }

    /// `seat` claims the discard into an exposed chow starting at `first`
    /// and becomes the active seat.
    #[instrument(skip(self))]
    pub fn takes_chow(&mut self, seat: Seat, first: Tile) -> Result<(), TransitionError> {
        let discard = self.pending_discard()?;
        let run = chow_run(first).ok_or_else(|| {
            TransitionError::new(format!("no chow can start at {}", first))
        })?;
        if !run.contains(&discard) {
            return Err(TransitionError::new(format!(
                "chow from {} does not contain the discard {}",
                first, discard
            )));
        }

        let player = self.player_mut(seat);
        let needed: Vec<Tile> = run.into_iter().filter(|&t| t != discard).collect();
        if let Some(missing) = needed.iter().find(|&&t| !player.concealed.contains(t)) {
            return Err(TransitionError::new(format!(
                "seat {} cannot chow from {}, {} is not held",
                seat, first, missing
            )));
        }

        for tile in needed {
            player.concealed.remove(tile);
        }
        player.exposed.add(Combination::Chow { first });
        self.active_discard = None;
        self.activate_seat(seat);
        Ok(())
    }

    /// `seat` claims the discard into an exposed pung and becomes the
    /// active seat.
    #[instrument(skip(self))]
    pub fn takes_pung(&mut self, seat: Seat) -> Result<(), TransitionError> {
        let tile = self.pending_discard()?;
        self.claim_set(seat, 2, Combination::Pung { tile })
    }

    /// `seat` claims the discard into an exposed kong and becomes the
    /// active seat.
    #[instrument(skip(self))]
    pub fn takes_kong(&mut self, seat: Seat) -> Result<(), TransitionError> {
        let tile = self.pending_discard()?;
        self.claim_set(
            seat,
            3,
            Combination::Kong {
                tile,
                concealed: false,
            },
        )
    }

    /// Moves `from_hand` held copies of the discard plus the discard itself
    /// into `meld`.
    fn claim_set(&mut self, seat: Seat, from_hand: u8, meld: Combination) -> Result<(), TransitionError> {
        let discard = self.pending_discard()?;
        let player = self.player_mut(seat);

        let held = player.concealed.count(discard);
        if held < from_hand {
            return Err(TransitionError::new(format!(
                "seat {} needs {} of {} to claim, holds {}",
                seat, from_hand, discard, held
            )));
        }

        for _ in 0..from_hand {
            player.concealed.remove(discard);
        }
        player.exposed.add(meld);
        self.active_discard = None;
        self.activate_seat(seat);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn player_mut_for_test(&mut self, seat: Seat) -> &mut Player {
        self.player_mut(seat)
    }

    #[cfg(test)]
    pub(crate) fn wall_mut_for_test(&mut self) -> &mut TileCollection {
        &mut self.wall
    }
}

/// The three tiles of the chow starting at `first`.
fn chow_run(first: Tile) -> Option<[Tile; 3]> {
    let suit = first.suit()?;
    let rank = first.rank()?;
    Some([suit.tile(rank)?, suit.tile(rank + 1)?, suit.tile(rank + 2)?])
}

/// Read-only copy of a [`Table`] for rendering and comparison.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Round-level wind.
    prevalent_wind: Wind,
    /// Undrawn tiles.
    wall: TileCollection,
    /// Seat whose turn it is.
    active_seat: Seat,
    /// Discard awaiting reactions.
    active_discard: Option<Tile>,
    /// Players indexed by seat.
    players: [Player; Seat::COUNT],
}

impl TableSnapshot {
    /// The player at `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Tiles accounted for across the wall, players and pending discard.
    pub fn tile_count(&self) -> usize {
        self.wall.size()
            + self.players.iter().map(Player::tile_count).sum::<usize>()
            + usize::from(self.active_discard.is_some())
    }
}
