//! Per-seat player data and the menus derived from it.

use crate::{Combination, CombinationCollection, MahjongAction, Tile, TileCollection, Wind, scoring};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One player's tiles and standing.
///
/// The tile just drawn is held apart from the concealed hand until the
/// player acts on it, so "discard what I drew" and "discard from my hand"
/// stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Score. Not tallied yet.
    pub(crate) score: i32,
    /// Seat wind, rotated every round.
    pub(crate) wind: Wind,
    /// Tile just drawn, if the player has not acted on it yet.
    pub(crate) received: Option<Tile>,
    /// Private hand.
    pub(crate) concealed: TileCollection,
    /// Declared melds.
    pub(crate) exposed: CombinationCollection,
    /// Own discards nobody claimed.
    pub(crate) discarded: TileCollection,
}

impl Player {
    /// Creates a player with an empty hand.
    pub fn new(wind: Wind) -> Self {
        Self {
            score: 0,
            wind,
            received: None,
            concealed: TileCollection::new(),
            exposed: CombinationCollection::new(),
            discarded: TileCollection::new(),
        }
    }

    /// Number of physical tiles this player accounts for.
    pub fn tile_count(&self) -> usize {
        self.concealed.size()
            + self.discarded.size()
            + self.exposed.tile_count()
            + usize::from(self.received.is_some())
    }

    /// Options after a draw, or after a claim when nothing was drawn.
    #[instrument(skip(self), fields(received = ?self.received))]
    pub fn must_discard_actions(&self) -> Vec<MahjongAction> {
        match self.received {
            Some(received) => self.tile_received_actions(received),
            None => self.discard_after_combination_actions(),
        }
    }

    /// Options after claiming a discard: discard anything held, or declare
    /// a concealed kong on four held copies.
    fn discard_after_combination_actions(&self) -> Vec<MahjongAction> {
        let mut actions = Vec::new();

        for (tile, count) in self.concealed.iter() {
            actions.push(MahjongAction::Discard(tile));
            if count == 4 {
                actions.push(MahjongAction::DeclareConcealedKong(tile));
            }
        }

        if scoring::can_declare_mahjong(self) {
            actions.push(MahjongAction::DeclareMahjong);
        }

        actions
    }

    /// Options after drawing `received`.
    fn tile_received_actions(&self, received: Tile) -> Vec<MahjongAction> {
        let mut actions = vec![MahjongAction::Discard(received)];

        for (tile, count) in self.concealed.iter() {
            if tile != received {
                actions.push(MahjongAction::Discard(tile));
            }
            if count == 4 || (count == 3 && tile == received) {
                actions.push(MahjongAction::DeclareConcealedKong(tile));
            }
        }

        if self.exposed.contains(&Combination::Pung { tile: received }) {
            actions.push(MahjongAction::ExposedPungToKong);
        }

        if scoring::can_declare_mahjong(self) {
            actions.push(MahjongAction::DeclareMahjong);
        }

        actions
    }

    /// Options when another seat discarded `discarded`.
    ///
    /// Chows are only offered to the seat right after the discarding one.
    #[instrument(skip(self))]
    pub fn tile_discarded_actions(&self, discarded: Tile, is_next_seat: bool) -> Vec<MahjongAction> {
        let mut actions = vec![MahjongAction::DoNothing];

        match self.concealed.count(discarded) {
            2 => actions.push(MahjongAction::DeclarePung),
            3 => actions.push(MahjongAction::DeclareKong),
            _ => {}
        }

        if is_next_seat {
            actions.extend(
                possible_chows(&self.concealed, discarded)
                    .into_iter()
                    .map(MahjongAction::DeclareChow),
            );
        }

        if scoring::can_declare_mahjong(self) {
            actions.push(MahjongAction::DeclareMahjong);
        }

        actions
    }
}

/// Runs `[i, i+1, i+2]` containing `tile` that `hand` can complete.
///
/// Every tile of the run other than `tile` itself must be held. Runs are
/// identified by their lowest tile. Honors and bonus tiles never chow.
pub fn possible_chows(hand: &TileCollection, tile: Tile) -> Vec<Tile> {
    let (Some(suit), Some(rank)) = (tile.suit(), tile.rank()) else {
        return Vec::new();
    };

    (1..=7u8)
        .filter(|&low| (low..=low + 2).contains(&rank))
        .filter(|&low| {
            (low..=low + 2)
                .filter(|&r| r != rank)
                .all(|r| suit.tile(r).is_some_and(|t| hand.contains(t)))
        })
        .filter_map(|low| suit.tile(low))
        .collect()
}
