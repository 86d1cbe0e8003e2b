//! Seat positions around the table.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// One of the four fixed player positions (0-3) around the table.
///
/// Seats are listed clockwise, so "the next seat" is always the one
/// with the next index, wrapping from [`Seat::Fourth`] back to [`Seat::First`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Seat {
    /// Seat 0.
    First,
    /// Seat 1.
    Second,
    /// Seat 2.
    Third,
    /// Seat 3.
    Fourth,
}

impl Seat {
    /// All seats in clockwise order, starting at seat 0.
    pub const ALL: [Seat; 4] = [Seat::First, Seat::Second, Seat::Third, Seat::Fourth];

    /// Number of seats at a table.
    pub const COUNT: usize = 4;

    /// Returns the index of this seat (0-3).
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
            Seat::Third => 2,
            Seat::Fourth => 3,
        }
    }

    /// Returns the seat at the given index, if it is in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the seat `steps` positions clockwise from this one.
    pub fn offset(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % Self::COUNT]
    }

    /// Returns the seat immediately following this one.
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Returns the other three seats in proximity order, closest first.
    pub fn others(self) -> [Seat; 3] {
        [self.offset(1), self.offset(2), self.offset(3)]
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.index() as u8
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Seat::from_index(value as usize)
            .ok_or_else(|| format!("seat index {} is out of range (0 to 3)", value))
    }
}
