//! Error taxonomy for driving a state machine.

use crate::Seat;
use derive_more::{Display, Error};
use tracing::instrument;

/// Inconsistency reported by a transition function itself.
///
/// Carries the source location of the rule that rejected the transition.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{} at {}:{}", message, file, line)]
pub struct TransitionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransitionError {
    /// Creates a new transition error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Errors returned by [`Driver::transition`](crate::Driver::transition).
///
/// None of these are swallowed by the driver. After any of them the driver
/// still points at the last state it successfully reached.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DriverError {
    /// No selection, or an out-of-range selection, was given for a seat
    /// whose action is required. The game is unchanged; resubmit.
    #[display("an action is required for seat [{}] {}", seat, menu_range(*options))]
    IncorrectAction {
        /// The offending seat.
        seat: Seat,
        /// Number of options on that seat's menu.
        options: usize,
    },

    /// A chain of action-less states exceeded the configured ceiling.
    /// This points at a cycle in the transition graph.
    #[display(
        "transitioning to next action state took more than [{}] steps (visited: {})",
        limit,
        history.join(" -> ")
    )]
    TooManyIntermediateStates {
        /// The configured transition limit.
        limit: usize,
        /// Names of the states visited, in order.
        history: Vec<&'static str>,
    },

    /// A transition function rejected the transition.
    #[display("game logic error: {}", _0)]
    GameLogic(#[error(source)] TransitionError),
}

/// Describes the valid indices of a menu with `options` entries.
fn menu_range(options: usize) -> String {
    match options {
        0 => "but its menu is empty".to_string(),
        n => format!("within range [0 to {}]", n - 1),
    }
}
