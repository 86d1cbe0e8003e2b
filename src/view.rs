//! JSON-ready projection of a game for rendering.

use derive_getters::Getters;
use mahjong_driver::Seat;
use mahjong_rules::{
    CombinationCollection, MahjongAction, MahjongGame, Player, Tile, TileCollection,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

/// Text shown for a tile slot that is empty.
pub const NO_TILE: &str = "none";

/// Everything a client needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameView {
    /// Whether the game is over.
    has_ended: bool,
    /// Name of the current state.
    state_name: String,
    /// Round-level wind.
    prevalent_wind: String,
    /// Seats the game is waiting on.
    active_players: Vec<Seat>,
    /// Discard awaiting reactions, or [`NO_TILE`].
    active_discard: String,
    /// Per-seat details.
    players: BTreeMap<Seat, PlayerView>,
    /// Undrawn tiles.
    wall: Vec<String>,
}

/// One seat's view: its menu and its tiles.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerView {
    /// Menu index to action description. Empty if the seat is not asked.
    actions: BTreeMap<usize, String>,
    /// Score.
    score: i32,
    /// Seat wind.
    wind: String,
    /// Tile just drawn, or [`NO_TILE`].
    received: String,
    /// Concealed hand.
    concealed: Vec<String>,
    /// Exposed melds.
    exposed: Vec<String>,
    /// Unclaimed discards.
    discarded: Vec<String>,
}

impl GameView {
    /// Projects `game` from one consistent read of its state and table.
    #[instrument(skip(game), fields(state = game.state_name()))]
    pub fn of(game: &MahjongGame) -> Self {
        game.inspect(|state, table| {
            let menus = state.actions();
            let active_players = menus
                .map(|m| m.keys().copied().collect())
                .unwrap_or_default();

            let players = Seat::ALL
                .into_iter()
                .map(|seat| {
                    let actions = menus
                        .and_then(|m| m.get(&seat))
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    (seat, PlayerView::of(table.player(seat), actions))
                })
                .collect();

            Self {
                has_ended: state.is_terminal(),
                state_name: state.name().to_string(),
                prevalent_wind: table.prevalent_wind().to_string(),
                active_players,
                active_discard: tile_name(*table.active_discard()),
                players,
                wall: collection_names(table.wall()),
            }
        })
    }
}

impl PlayerView {
    fn of(player: &Player, actions: &[MahjongAction]) -> Self {
        Self {
            actions: actions
                .iter()
                .enumerate()
                .map(|(i, a)| (i, a.to_string()))
                .collect(),
            score: *player.score(),
            wind: player.wind().to_string(),
            received: tile_name(*player.received()),
            concealed: collection_names(player.concealed()),
            exposed: combination_names(player.exposed()),
            discarded: collection_names(player.discarded()),
        }
    }
}

fn tile_name(tile: Option<Tile>) -> String {
    tile.map_or_else(|| NO_TILE.to_string(), |t| t.to_string())
}

/// `"2× Bamboo 1"` per distinct tile, in tile order.
fn collection_names(tiles: &TileCollection) -> Vec<String> {
    tiles
        .iter()
        .map(|(tile, count)| format!("{}× {}", count, tile))
        .collect()
}

/// Melds in sort-key order: chows, pungs, kongs, then bonus tiles.
fn combination_names(combinations: &CombinationCollection) -> Vec<String> {
    combinations
        .sorted()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_rules::{Combination, GameConfig};

    #[test]
    fn test_collection_names() {
        let tiles: TileCollection = [Tile::RedDragon, Tile::Bamboo1, Tile::Bamboo1]
            .into_iter()
            .collect();
        assert_eq!(
            collection_names(&tiles),
            vec!["2× Bamboo 1".to_string(), "1× Red Dragon".to_string()]
        );
    }

    #[test]
    fn test_combination_names_in_sort_order() {
        let mut melds = CombinationCollection::default();
        melds.add(Combination::BonusTile {
            tile: Tile::FlowerOrchid,
        });
        melds.add(Combination::Pung {
            tile: Tile::RedDragon,
        });
        melds.add(Combination::Chow {
            first: Tile::Bamboo2,
        });

        assert_eq!(
            combination_names(&melds),
            vec![
                "Chow Bamboo 2".to_string(),
                "Pung Red Dragon".to_string(),
                "Bonus tile Orchid (flower)".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_tile_is_none() {
        assert_eq!(tile_name(None), "none");
        assert_eq!(tile_name(Some(Tile::FlowerPlumb)), "Plumb (flower)");
    }

    #[test]
    fn test_new_game_view() {
        let game = MahjongGame::new(&GameConfig::default().with_seed(1)).unwrap();
        let view = GameView::of(&game);

        assert!(!view.has_ended());
        assert_eq!(view.state_name(), "Must Discard");
        assert_eq!(view.prevalent_wind(), "East");
        assert_eq!(view.active_discard(), NO_TILE);
        assert_eq!(view.active_players(), &vec![Seat::First]);
        assert_eq!(view.players()[&Seat::Third].wind(), "West");
        assert!(view.players()[&Seat::Third].actions().is_empty());

        let first = &view.players()[&Seat::First];
        assert_ne!(first.received(), NO_TILE);
        assert_eq!(first.actions()[&0].split(' ').next(), Some("Discard"));
    }
}
