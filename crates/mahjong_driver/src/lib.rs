//! Generic driver for seat-based turn state machines.
//!
//! A game is modelled as a sequence of named [`State`]s. Each state declares
//! which seats must pick an action before play continues, and a transition
//! (a value implementing [`Transition`]) that consumes those picks and
//! produces the next state. The [`Driver`] validates selections, applies
//! them, and auto-advances through states that need no input.
//!
//! # Example
//!
//! ```
//! use mahjong_driver::{Action, Driver, SelectedActions, Selection, State, Transition, TransitionError};
//!
//! #[derive(Debug, Clone)]
//! struct Tick;
//!
//! impl Action for Tick {
//!     fn action_order(&self) -> i32 {
//!         0
//!     }
//! }
//!
//! #[derive(Debug, Clone)]
//! enum Countdown {
//!     Decrement,
//! }
//!
//! impl Transition for Countdown {
//!     type Context = u32;
//!     type Action = Tick;
//!
//!     fn transition(
//!         &self,
//!         remaining: &mut u32,
//!         _selected: SelectedActions<Tick>,
//!     ) -> Result<State<Self>, TransitionError> {
//!         *remaining = remaining.saturating_sub(1);
//!         if *remaining == 0 {
//!             Ok(State::terminal("Done"))
//!         } else {
//!             Ok(State::intermediate("Counting", Countdown::Decrement))
//!         }
//!     }
//! }
//!
//! let driver = Driver::new(State::intermediate("Start", Countdown::Decrement), 3, 10);
//! driver.transition(&Selection::new()).unwrap();
//! assert!(driver.has_terminated());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod driver;
mod error;
mod seat;
mod state;

pub use driver::Driver;
pub use error::{DriverError, TransitionError};
pub use seat::Seat;
pub use state::{Action, SeatActions, SelectedActions, Selection, State, Transition};
