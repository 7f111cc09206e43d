//! Middleware wrapped around every dispatch.
//!
//! Middleware observes dispatches: it sees the state before the reducer runs,
//! the action, and the state that was published. It cannot alter or drop an
//! action.

use slicestore_core::action::Action;
use std::fmt::Debug;

/// Observer hooked into [`Store::dispatch`](crate::Store::dispatch)
///
/// Both hooks default to no-ops, so an implementation only overrides what
/// it needs.
pub trait Middleware<S, A>: Send + Sync {
    /// Called before the reducer runs, with the state it will start from
    fn before_dispatch(&self, _state: &S, _action: &A) {}

    /// Called after the new state has been published
    fn after_dispatch(&self, _previous: &S, _action: &A, _next: &S) {}
}

/// Logs every dispatch through `tracing`
///
/// The action type is logged at `debug`; the state before and after the
/// reducer at `trace`.
///
/// # Example
///
/// ```ignore
/// let store = Store::new(state, reducer, env).with_middleware(ActionLogger);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionLogger;

impl<S, A> Middleware<S, A> for ActionLogger
where
    S: Debug,
    A: Action + Debug,
{
    fn before_dispatch(&self, state: &S, action: &A) {
        tracing::debug!(action = action.action_type(), payload = ?action, "Dispatching action");
        tracing::trace!(prev_state = ?state, "State before reducer");
    }

    fn after_dispatch(&self, _previous: &S, action: &A, next: &S) {
        tracing::trace!(action = action.action_type(), next_state = ?next, "State after reducer");
    }
}
