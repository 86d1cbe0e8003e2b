//! Declared melds.

use crate::Tile;
use serde::{Deserialize, Serialize};

/// A meld a player has declared and exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combination {
    /// Three consecutive tiles of one suit, identified by the lowest.
    Chow {
        /// Lowest tile of the run.
        first: Tile,
    },
    /// Three of a kind.
    Pung {
        /// The tile.
        tile: Tile,
    },
    /// Four of a kind.
    Kong {
        /// The tile.
        tile: Tile,
        /// Declared from the concealed hand rather than claimed.
        concealed: bool,
    },
    /// A flower or season, exposed as soon as it was drawn.
    BonusTile {
        /// The bonus tile.
        tile: Tile,
    },
}

impl Combination {
    /// Sort key. Unique among all combinations a player can hold.
    pub fn combination_order(&self) -> i32 {
        match self {
            Combination::Chow { first } => first.code() as i32,
            Combination::Pung { tile } => tile.code() as i32 + 100,
            Combination::Kong { tile, .. } => tile.code() as i32 + 200,
            Combination::BonusTile { tile } => tile.code() as i32 + 300,
        }
    }

    /// Number of physical tiles in this combination.
    pub fn tile_count(&self) -> usize {
        match self {
            Combination::Chow { .. } | Combination::Pung { .. } => 3,
            Combination::Kong { .. } => 4,
            Combination::BonusTile { .. } => 1,
        }
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combination::Chow { first } => write!(f, "Chow {}", first),
            Combination::Pung { tile } => write!(f, "Pung {}", tile),
            Combination::Kong {
                tile,
                concealed: true,
            } => write!(f, "Concealed Kong {}", tile),
            Combination::Kong { tile, .. } => write!(f, "Kong {}", tile),
            Combination::BonusTile { tile } => write!(f, "Bonus tile {}", tile),
        }
    }
}

/// The melds one player has exposed, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationCollection {
    combinations: Vec<Combination>,
}

impl CombinationCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an identical combination is held.
    pub fn contains(&self, combination: &Combination) -> bool {
        self.combinations.contains(combination)
    }

    /// Appends a combination.
    pub fn add(&mut self, combination: Combination) {
        self.combinations.push(combination);
    }

    /// Substitutes the first combination equal to `old` with `new`.
    ///
    /// Returns whether a substitution happened.
    pub fn replace(&mut self, old: &Combination, new: Combination) -> bool {
        match self.combinations.iter_mut().find(|c| **c == *old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    /// Removes every combination.
    pub fn empty(&mut self) {
        self.combinations.clear();
    }

    /// Combinations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.combinations.iter()
    }

    /// Combinations ordered by their sort key, for display.
    pub fn sorted(&self) -> Vec<Combination> {
        let mut sorted = self.combinations.clone();
        sorted.sort_by_key(Combination::combination_order);
        sorted
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// Whether no combination is held.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Number of physical tiles across all combinations.
    pub fn tile_count(&self) -> usize {
        self.combinations.iter().map(Combination::tile_count).sum()
    }
}
