//! # Slicestore Core
//!
//! Core traits and types for the slicestore state container.
//!
//! This crate provides the fundamental abstractions for building a
//! unidirectional state container out of small, independent reducers.
//!
//! ## Core Concepts
//!
//! - **State**: Plain owned data for a feature (or a slice of it)
//! - **Action**: A tagged value describing a requested state change
//! - **Reducer**: Total function `(State, Action, Environment) → State`
//! - **Environment**: Injected dependencies (id generation)
//!
//! ## Architecture Principles
//!
//! - Unidirectional Data Flow
//! - Slices are reduced independently and reassembled
//! - Unknown actions pass state through unchanged
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use slicestore_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct CounterState {
//!     count: u64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Noop,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!             CounterAction::Noop => {},
//!         }
//!     }
//! }
//!
//! let before = CounterState::default();
//! let after = CounterReducer.apply(&before, CounterAction::Increment, &());
//! assert_eq!(before.count, 0);
//! assert_eq!(after.count, 1);
//! ```

pub use uuid::Uuid;

/// Reducer composition utilities
pub mod composition;

/// Action module - common behavior of action enums
///
/// Actions are usually enums deriving `Action` through `slicestore-macros`,
/// which fills in [`Action::action_type`] from the variant names.
pub mod action {
    /// Common behavior shared by every action type.
    ///
    /// # Example
    ///
    /// ```
    /// use slicestore_core::action::Action;
    ///
    /// enum LightAction {
    ///     SwitchOn,
    ///     SwitchOff,
    /// }
    ///
    /// impl Action for LightAction {
    ///     fn action_type(&self) -> &'static str {
    ///         match self {
    ///             Self::SwitchOn => "SWITCH_ON",
    ///             Self::SwitchOff => "SWITCH_OFF",
    ///         }
    ///     }
    /// }
    ///
    /// assert_eq!(LightAction::SwitchOff.action_type(), "SWITCH_OFF");
    /// ```
    pub trait Action {
        /// Stable discriminant of this action (e.g. `"CREATE_TODO"`)
        ///
        /// Used for logging and as the `type` tag of the wire shape.
        fn action_type(&self) -> &'static str;
    }
}

/// Reducer module - the core trait for state transitions
///
/// Reducers are total functions: `(State, Action, Environment) → State`.
/// An action a reducer does not handle leaves its state untouched.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or slice of state) this reducer owns
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// `reduce` updates a draft the caller owns exclusively. Callers that need
    /// the pure form, where the input stays valid, use [`Reducer::apply`].
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into the given draft state
        ///
        /// # Arguments
        ///
        /// - `state`: Draft state, owned exclusively by the caller
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        );

        /// Pure form of [`Reducer::reduce`]
        ///
        /// Copies `state`, reduces the copy and returns it. The input is left
        /// untouched, so earlier states stay valid.
        #[must_use]
        fn apply(
            &self,
            state: &Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Self::State
        where
            Self::State: Clone,
        {
            let mut next = state.clone();
            self.reduce(&mut next, action, env);
            next
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All non-deterministic inputs (today: identifier generation) are
/// abstracted behind traits so tests can swap in predictable versions.
pub mod environment {
    use uuid::Uuid;

    /// Source of unique identifiers
    ///
    /// # Examples
    ///
    /// ```
    /// use slicestore_core::environment::{IdGenerator, UuidGenerator};
    ///
    /// let ids = UuidGenerator;
    /// assert_ne!(ids.next_id(), ids.next_id());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce an identifier never returned before by this generator
        fn next_id(&self) -> Uuid;
    }

    /// Production id generator: time-ordered UUID v7
    ///
    /// Ids generated within one process are strictly increasing, so they
    /// never collide with previously generated ones.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::now_v7()
        }
    }

    impl<G: IdGenerator + ?Sized> IdGenerator for &G {
        fn next_id(&self) -> Uuid {
            (**self).next_id()
        }
    }

    impl<G: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<G> {
        fn next_id(&self) -> Uuid {
            (**self).next_id()
        }
    }
}
