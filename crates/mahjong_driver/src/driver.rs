//! The generic driver that advances a state machine.

use crate::state::sort_menus;
use crate::{DriverError, SeatActions, SelectedActions, Selection, State, Transition};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, instrument, warn};

/// Current state plus the data its transitions operate on.
struct Machine<T: Transition> {
    state: State<T>,
    context: T::Context,
}

/// Owns a state machine and advances it one decision at a time.
///
/// Every call to [`Driver::transition`] holds the write lock for its full
/// duration, auto-advance loop included, so at most one transition is in
/// flight per driver. Readers take the read lock and never see a state
/// mid-transition.
pub struct Driver<T: Transition> {
    transition_limit: usize,
    machine: RwLock<Machine<T>>,
}

impl<T: Transition> Driver<T> {
    /// Creates a driver positioned at `initial`.
    ///
    /// `transition_limit` bounds how many action-less states may be passed
    /// through consecutively in one call to [`Driver::transition`].
    pub fn new(initial: State<T>, context: T::Context, transition_limit: usize) -> Self {
        Self {
            transition_limit,
            machine: RwLock::new(Machine {
                state: initial,
                context,
            }),
        }
    }

    /// The configured ceiling on consecutive action-less states.
    pub fn transition_limit(&self) -> usize {
        self.transition_limit
    }

    /// Name of the current state.
    pub fn state_name(&self) -> &'static str {
        self.read().state.name()
    }

    /// Whether the current state is terminal. If so, transitions are no-ops.
    pub fn has_terminated(&self) -> bool {
        self.read().state.is_terminal()
    }

    /// Whether the current state waits on some seat.
    pub fn requires_actions(&self) -> bool {
        self.read().state.requires_actions()
    }

    /// Menus available in the current state, sorted by action order.
    ///
    /// Empty when the current state needs no input.
    pub fn available_actions(&self) -> SeatActions<T::Action> {
        let mut actions = self.read().state.actions().cloned().unwrap_or_default();
        sort_menus(&mut actions);
        actions
    }

    /// Runs `f` against the current state and context under the read lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&State<T>, &T::Context) -> R) -> R {
        let machine = self.read();
        f(&machine.state, &machine.context)
    }

    /// Applies one round of seat selections and advances to the next
    /// state that requires a decision, or to a terminal state.
    ///
    /// # Errors
    ///
    /// - [`DriverError::IncorrectAction`] if a required seat is missing from
    ///   `selection` or its index is out of range. Nothing is mutated.
    /// - [`DriverError::TooManyIntermediateStates`] if more than the transition
    ///   limit of action-less states are passed through.
    /// - [`DriverError::GameLogic`] if a transition function fails. The driver
    ///   keeps the state it had before that call.
    #[instrument(skip(self, selection), fields(selection = ?selection))]
    pub fn transition(&self, selection: &Selection) -> Result<(), DriverError> {
        let mut guard = self.write();
        let Machine { state, context } = &mut *guard;

        if state.is_terminal() {
            debug!(state = state.name(), "Transition on terminal state ignored");
            return Ok(());
        }

        let mut selected = select_actions(state, selection)?;
        let mut history = Vec::new();

        loop {
            let Some(step) = state.transition() else {
                return Ok(());
            };

            let next = step
                .transition(context, std::mem::take(&mut selected))
                .map_err(|e| {
                    error!(state = state.name(), error = %e, "Transition logic failed");
                    DriverError::GameLogic(e)
                })?;

            debug!(from = state.name(), to = next.name(), "State changed");
            *state = next;

            if state.is_terminal() || state.requires_actions() {
                return Ok(());
            }

            history.push(state.name());
            if history.len() > self.transition_limit {
                error!(
                    limit = self.transition_limit,
                    history = ?history,
                    "Too many intermediate states, the transition graph probably cycles"
                );
                return Err(DriverError::TooManyIntermediateStates {
                    limit: self.transition_limit,
                    history,
                });
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Machine<T>> {
        self.machine.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Machine<T>> {
        self.machine.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Transition> std::fmt::Debug for Driver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("transition_limit", &self.transition_limit)
            .field("state", &self.state_name())
            .finish()
    }
}

/// Maps each required seat's index onto its menu.
fn select_actions<T: Transition>(
    state: &State<T>,
    selection: &Selection,
) -> Result<SelectedActions<T::Action>, DriverError> {
    let mut selected = SelectedActions::new();

    let Some(menus) = state.actions() else {
        return Ok(selected);
    };

    for (seat, menu) in menus {
        let action = selection
            .get(seat)
            .and_then(|&index| menu.get(index))
            .ok_or_else(|| {
                warn!(
                    %seat,
                    given = ?selection.get(seat),
                    options = menu.len(),
                    "Incorrect action selection"
                );
                DriverError::IncorrectAction {
                    seat: *seat,
                    options: menu.len(),
                }
            })?;
        selected.insert(*seat, action.clone());
    }

    Ok(selected)
}
