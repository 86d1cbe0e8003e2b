//! Tile identifiers and winds.
//!
//! Tiles are integer coded. Suited tiles encode `suit * 10 + rank`, so runs
//! can be computed on the rank alone.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr};

/// A mahjong tile kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    FromRepr,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Tile {
    Bamboo1 = 1,
    Bamboo2 = 2,
    Bamboo3 = 3,
    Bamboo4 = 4,
    Bamboo5 = 5,
    Bamboo6 = 6,
    Bamboo7 = 7,
    Bamboo8 = 8,
    Bamboo9 = 9,
    Circles1 = 11,
    Circles2 = 12,
    Circles3 = 13,
    Circles4 = 14,
    Circles5 = 15,
    Circles6 = 16,
    Circles7 = 17,
    Circles8 = 18,
    Circles9 = 19,
    Characters1 = 21,
    Characters2 = 22,
    Characters3 = 23,
    Characters4 = 24,
    Characters5 = 25,
    Characters6 = 26,
    Characters7 = 27,
    Characters8 = 28,
    Characters9 = 29,
    RedDragon = 30,
    GreenDragon = 31,
    WhiteDragon = 32,
    EastWind = 40,
    SouthWind = 41,
    WestWind = 42,
    NorthWind = 43,
    FlowerPlumb = 50,
    FlowerOrchid = 51,
    FlowerChrysanthemum = 52,
    FlowerBamboo = 53,
    SeasonSpring = 60,
    SeasonSummer = 61,
    SeasonAutumn = 62,
    SeasonWinter = 63,
}

/// The three suits of numbered tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Suit {
    /// Bamboo 1-9 (codes 1-9).
    Bamboo,
    /// Circles 1-9 (codes 11-19).
    Circles,
    /// Characters 1-9 (codes 21-29).
    Characters,
}

impl Suit {
    fn base(self) -> u8 {
        match self {
            Suit::Bamboo => 0,
            Suit::Circles => 10,
            Suit::Characters => 20,
        }
    }

    /// Returns the tile of this suit with the given rank (1-9).
    pub fn tile(self, rank: u8) -> Option<Tile> {
        if (1..=9).contains(&rank) {
            Tile::from_code(self.base() + rank)
        } else {
            None
        }
    }
}

impl Tile {
    /// Numeric code of this tile.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the tile with the given numeric code, if any.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_repr(code)
    }

    /// Suit of a numbered tile, `None` for honors and bonus tiles.
    pub fn suit(self) -> Option<Suit> {
        match self.code() {
            1..=9 => Some(Suit::Bamboo),
            11..=19 => Some(Suit::Circles),
            21..=29 => Some(Suit::Characters),
            _ => None,
        }
    }

    /// Rank (1-9) of a numbered tile.
    pub fn rank(self) -> Option<u8> {
        self.suit().map(|_| self.code() % 10)
    }

    /// Whether this is a numbered (suited) tile.
    pub fn is_suit(self) -> bool {
        self.suit().is_some()
    }

    /// Whether this is a dragon.
    pub fn is_dragon(self) -> bool {
        (30..=32).contains(&self.code())
    }

    /// Whether this is a wind tile.
    pub fn is_wind(self) -> bool {
        (40..=43).contains(&self.code())
    }

    /// Whether this is a flower.
    pub fn is_flower(self) -> bool {
        (50..=53).contains(&self.code())
    }

    /// Whether this is a season.
    pub fn is_season(self) -> bool {
        (60..=63).contains(&self.code())
    }

    /// Flowers and seasons. These are exposed as soon as they are drawn.
    pub fn is_bonus(self) -> bool {
        self.is_flower() || self.is_season()
    }

    /// How many copies of this tile a full set holds.
    pub fn copies_in_set(self) -> u8 {
        if self.is_bonus() { 1 } else { 4 }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Tile::Bamboo1 => "Bamboo 1",
            Tile::Bamboo2 => "Bamboo 2",
            Tile::Bamboo3 => "Bamboo 3",
            Tile::Bamboo4 => "Bamboo 4",
            Tile::Bamboo5 => "Bamboo 5",
            Tile::Bamboo6 => "Bamboo 6",
            Tile::Bamboo7 => "Bamboo 7",
            Tile::Bamboo8 => "Bamboo 8",
            Tile::Bamboo9 => "Bamboo 9",
            Tile::Circles1 => "Circles 1",
            Tile::Circles2 => "Circles 2",
            Tile::Circles3 => "Circles 3",
            Tile::Circles4 => "Circles 4",
            Tile::Circles5 => "Circles 5",
            Tile::Circles6 => "Circles 6",
            Tile::Circles7 => "Circles 7",
            Tile::Circles8 => "Circles 8",
            Tile::Circles9 => "Circles 9",
            Tile::Characters1 => "Characters 1",
            Tile::Characters2 => "Characters 2",
            Tile::Characters3 => "Characters 3",
            Tile::Characters4 => "Characters 4",
            Tile::Characters5 => "Characters 5",
            Tile::Characters6 => "Characters 6",
            Tile::Characters7 => "Characters 7",
            Tile::Characters8 => "Characters 8",
            Tile::Characters9 => "Characters 9",
            Tile::RedDragon => "Red Dragon",
            Tile::GreenDragon => "Green Dragon",
            Tile::WhiteDragon => "White Dragon",
            Tile::EastWind => "East Wind",
            Tile::SouthWind => "South Wind",
            Tile::WestWind => "West Wind",
            Tile::NorthWind => "North Wind",
            Tile::FlowerPlumb => "Plumb (flower)",
            Tile::FlowerOrchid => "Orchid (flower)",
            Tile::FlowerChrysanthemum => "Chrysanthemum (flower)",
            Tile::FlowerBamboo => "Bamboo (flower)",
            Tile::SeasonSpring => "Spring (season)",
            Tile::SeasonSummer => "Summer (season)",
            Tile::SeasonAutumn => "Autumn (season)",
            Tile::SeasonWinter => "Winter (season)",
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Round-level (prevalent) and player-level (seat) wind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
    EnumIter,
)]
pub enum Wind {
    /// East, the first wind.
    East,
    /// South.
    South,
    /// West.
    West,
    /// North, the last wind.
    North,
}

impl Wind {
    /// The wind that follows this one, wrapping from North to East.
    pub fn next(self) -> Self {
        match self {
            Wind::East => Wind::South,
            Wind::South => Wind::West,
            Wind::West => Wind::North,
            Wind::North => Wind::East,
        }
    }

    /// The wind tile matching this wind.
    pub fn tile(self) -> Tile {
        match self {
            Wind::East => Tile::EastWind,
            Wind::South => Tile::SouthWind,
            Wind::West => Tile::WestWind,
            Wind::North => Tile::NorthWind,
        }
    }
}
