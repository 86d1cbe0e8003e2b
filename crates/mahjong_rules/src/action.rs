//! Actions a seat can choose from its menu.

use crate::Tile;
use derive_more::Display;
use mahjong_driver::Action;
use serde::{Deserialize, Serialize};

/// Every action offered by the mahjong turn engine.
///
/// The first three answer a draw (the "Must Discard" state), the next four
/// answer another seat's discard (the "Tile Discarded" state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum MahjongAction {
    /// Discard the given tile from the hand or the tile just received.
    #[display("Discard a {}", _0)]
    Discard(Tile),
    /// Expose four held copies of a tile as a concealed kong.
    #[display("Declare a concealed Kong of {}", _0)]
    DeclareConcealedKong(Tile),
    /// Add the received tile to a matching exposed pung.
    #[display("Add to exposed pung")]
    ExposedPungToKong,
    /// Let the discard pass.
    #[display("Do nothing")]
    DoNothing,
    /// Claim the discard to complete a run starting at the given tile.
    #[display("Declare chow up from {}", _0)]
    DeclareChow(Tile),
    /// Claim the discard to complete three of a kind.
    #[display("Declare a pung")]
    DeclarePung,
    /// Claim the discard to complete four of a kind.
    #[display("Declare a kong")]
    DeclareKong,
    /// Declare a winning hand. Reserved; never offered while scoring is stubbed.
    #[display("Declare mahjong")]
    DeclareMahjong,
}

impl MahjongAction {
    /// Priority when competing for a discard. Higher wins.
    ///
    /// `None` for actions that are not answers to a discard.
    pub fn reaction_priority(&self) -> Option<u8> {
        match self {
            MahjongAction::DoNothing => Some(1),
            MahjongAction::DeclareChow(_) => Some(2),
            MahjongAction::DeclarePung => Some(3),
            MahjongAction::DeclareKong => Some(4),
            MahjongAction::DeclareMahjong => Some(5),
            MahjongAction::Discard(_)
            | MahjongAction::DeclareConcealedKong(_)
            | MahjongAction::ExposedPungToKong => None,
        }
    }
}

impl Action for MahjongAction {
    fn action_order(&self) -> i32 {
        match self {
            MahjongAction::Discard(tile) => tile.code() as i32,
            MahjongAction::DeclareConcealedKong(tile) => tile.code() as i32 + 100,
            MahjongAction::ExposedPungToKong => 200,
            MahjongAction::DoNothing => 0,
            MahjongAction::DeclareChow(tile) => tile.code() as i32,
            MahjongAction::DeclarePung => 100,
            MahjongAction::DeclareKong => 101,
            MahjongAction::DeclareMahjong => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_priorities_ordered() {
        let ranked = [
            MahjongAction::DoNothing,
            MahjongAction::DeclareChow(Tile::Bamboo1),
            MahjongAction::DeclarePung,
            MahjongAction::DeclareKong,
            MahjongAction::DeclareMahjong,
        ];
        let priorities: Vec<u8> = ranked
            .iter()
            .map(|a| a.reaction_priority().unwrap())
            .collect();
        assert_eq!(priorities, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_draw_answers_have_no_reaction_priority() {
        assert_eq!(
            MahjongAction::Discard(Tile::Circles2).reaction_priority(),
            None
        );
        assert_eq!(MahjongAction::ExposedPungToKong.reaction_priority(), None);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            MahjongAction::Discard(Tile::WestWind).to_string(),
            "Discard a West Wind"
        );
        assert_eq!(
            MahjongAction::DeclareChow(Tile::Circles3).to_string(),
            "Declare chow up from Circles 3"
        );
        assert_eq!(MahjongAction::DoNothing.to_string(), "Do nothing");
    }

    #[test]
    fn test_reaction_menu_orders_are_unique() {
        let mut orders: Vec<i32> = [
            MahjongAction::DoNothing,
            MahjongAction::DeclarePung,
            MahjongAction::DeclareKong,
            MahjongAction::DeclareMahjong,
        ]
        .iter()
        .chain(
            [Tile::Characters1, Tile::Characters2, Tile::Characters3]
                .map(MahjongAction::DeclareChow)
                .iter(),
        )
        .map(|a| a.action_order())
        .collect();
        let before = orders.len();
        orders.sort();
        orders.dedup();
        assert_eq!(orders.len(), before);
    }
}
