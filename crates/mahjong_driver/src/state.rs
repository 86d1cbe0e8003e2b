//! States, actions and the transition contract.

use crate::{Seat, TransitionError};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Per-seat menus of legal actions.
pub type SeatActions<A> = BTreeMap<Seat, Vec<A>>;

/// Caller-supplied choice per seat: an index into that seat's menu.
pub type Selection = BTreeMap<Seat, usize>;

/// Concrete action chosen per seat, handed to a transition.
pub type SelectedActions<A> = BTreeMap<Seat, A>;

/// An option a seat can choose while the game waits on it.
pub trait Action: Clone + Debug {
    /// Sort key for presenting options.
    ///
    /// Must be unique among the options offered to one seat at the same time,
    /// so menus have a stable order callers can index into.
    fn action_order(&self) -> i32;
}

/// The transition logic attached to a state.
///
/// Implemented by a tagged enum of state kinds. The shared game data is
/// passed in explicitly as the context, and the next state is returned
/// by value.
pub trait Transition: Clone + Debug + Sized {
    /// Mutable game data the transition operates on.
    type Context;

    /// Action type offered on this machine's menus.
    type Action: Action;

    /// Consumes the selected actions and produces the next state.
    ///
    /// `selected` is empty for states without a menu.
    fn transition(
        &self,
        context: &mut Self::Context,
        selected: SelectedActions<Self::Action>,
    ) -> Result<State<Self>, TransitionError>;
}

/// A named point in the game.
///
/// A state without a menu needs no input and is advanced automatically.
/// A state without a transition is terminal.
#[derive(Debug, Clone)]
pub struct State<T: Transition> {
    name: &'static str,
    actions: Option<SeatActions<T::Action>>,
    transition: Option<T>,
}

impl<T: Transition> State<T> {
    /// Creates a state that waits for the seats in `actions` to choose.
    pub fn new(name: &'static str, mut actions: SeatActions<T::Action>, transition: T) -> Self {
        sort_menus(&mut actions);
        Self {
            name,
            actions: Some(actions),
            transition: Some(transition),
        }
    }

    /// Creates a state that needs no input and advances on its own.
    pub fn intermediate(name: &'static str, transition: T) -> Self {
        Self {
            name,
            actions: None,
            transition: Some(transition),
        }
    }

    /// Creates a terminal state.
    pub fn terminal(name: &'static str) -> Self {
        Self {
            name,
            actions: None,
            transition: None,
        }
    }

    /// Human readable name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Menus per seat, or `None` if no input is required.
    pub fn actions(&self) -> Option<&SeatActions<T::Action>> {
        self.actions.as_ref()
    }

    /// The transition attached to this state, or `None` if terminal.
    pub fn transition(&self) -> Option<&T> {
        self.transition.as_ref()
    }

    /// Whether the state machine cannot progress past this state.
    pub fn is_terminal(&self) -> bool {
        self.transition.is_none()
    }

    /// Whether some seat must choose before this state can advance.
    pub fn requires_actions(&self) -> bool {
        self.actions.is_some()
    }
}

pub(crate) fn sort_menus<A: Action>(actions: &mut SeatActions<A>) {
    for menu in actions.values_mut() {
        menu.sort_by_key(|action| action.action_order());
    }
}
