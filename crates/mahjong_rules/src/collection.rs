//! Multisets of tiles.

use crate::Tile;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{instrument, trace};

/// A multiset of tiles with per-kind counts.
///
/// Counts never go negative, and a kind with count zero is not stored.
/// Enumeration follows tile order, which also keeps random draws
/// reproducible under a seeded generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCollection {
    tiles: BTreeMap<Tile, u8>,
}

impl TileCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a full 144 tile mahjong set.
    #[instrument]
    pub fn mahjong_set() -> Self {
        Self {
            tiles: Tile::iter().map(|t| (t, t.copies_in_set())).collect(),
        }
    }

    /// Number of copies of `tile` held.
    pub fn count(&self, tile: Tile) -> u8 {
        self.tiles.get(&tile).copied().unwrap_or(0)
    }

    /// Whether at least one copy of `tile` is held.
    pub fn contains(&self, tile: Tile) -> bool {
        self.count(tile) > 0
    }

    /// Total number of tiles held.
    pub fn size(&self) -> usize {
        self.tiles.values().map(|&c| c as usize).sum()
    }

    /// Whether no tiles are held.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Distinct tiles with their counts, in tile order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.tiles.iter().map(|(&t, &c)| (t, c))
    }

    /// Adds one copy of `tile`.
    pub fn add(&mut self, tile: Tile) {
        *self.tiles.entry(tile).or_insert(0) += 1;
    }

    /// Removes one copy of `tile`. Does nothing if none is held.
    ///
    /// Returns whether a copy was removed.
    pub fn remove(&mut self, tile: Tile) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.tiles.remove(&tile);
                true
            }
            None => false,
        }
    }

    /// Removes every copy of `tile`, returning how many were removed.
    pub fn remove_all(&mut self, tile: Tile) -> u8 {
        self.tiles.remove(&tile).unwrap_or(0)
    }

    /// Removes one tile picked uniformly over all physical tiles held.
    ///
    /// Returns `None` if the collection is empty.
    #[instrument(skip(self, rng), fields(size = self.size()))]
    pub fn remove_random<R: Rng>(&mut self, rng: &mut R) -> Option<Tile> {
        let flat: Vec<Tile> = self
            .tiles
            .iter()
            .flat_map(|(&tile, &count)| std::iter::repeat_n(tile, count as usize))
            .collect();

        if flat.is_empty() {
            return None;
        }

        let picked = flat[rng.random_range(0..flat.len())];
        self.remove(picked);
        trace!(tile = %picked, "Removed random tile");
        Some(picked)
    }

    /// Moves one copy of `tile` into `target`.
    ///
    /// Nothing moves and `false` is returned if no copy is held.
    pub fn transfer(&mut self, tile: Tile, target: &mut TileCollection) -> bool {
        if self.remove(tile) {
            target.add(tile);
            true
        } else {
            false
        }
    }

    /// Removes every tile.
    pub fn empty(&mut self) {
        self.tiles.clear();
    }
}

impl FromIterator<Tile> for TileCollection {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut collection = Self::new();
        for tile in iter {
            collection.add(tile);
        }
        collection
    }
}
