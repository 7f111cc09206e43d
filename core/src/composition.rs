//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one field (slice) of a larger state
//!
//! Together they build an aggregate reducer out of independent slice reducers:
//! each slice reducer is scoped onto its field, and the scoped reducers are
//! combined.
//!
//! # Example
//!
//! ```
//! use slicestore_core::composition::{combine_reducers, scope_reducer};
//! use slicestore_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState {
//!     hits: u64,
//!     last: Option<String>,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Visit(String),
//! }
//!
//! struct HitsReducer;
//! struct LastReducer;
//!
//! impl Reducer for HitsReducer {
//!     type State = u64;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, hits: &mut u64, _action: AppAction, _env: &()) {
//!         *hits += 1;
//!     }
//! }
//!
//! impl Reducer for LastReducer {
//!     type State = Option<String>;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, last: &mut Option<String>, action: AppAction, _env: &()) {
//!         let AppAction::Visit(page) = action;
//!         *last = Some(page);
//!     }
//! }
//!
//! let app = combine_reducers(vec![
//!     Box::new(scope_reducer(HitsReducer, |s: &mut AppState| &mut s.hits)),
//!     Box::new(scope_reducer(LastReducer, |s: &mut AppState| &mut s.last)),
//! ]);
//!
//! let mut state = AppState::default();
//! app.reduce(&mut state, AppAction::Visit("/".to_string()), &());
//! assert_eq!(state.hits, 1);
//! assert_eq!(state.last.as_deref(), Some("/"));
//! ```

use crate::reducer::Reducer;

/// Boxed reducer over a given state/action/environment triple
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer receives its own clone of the action and runs in the order
/// given. Reducers scoped onto disjoint fields do not observe each other, so
/// their order does not matter.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers combined
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether no reducer was combined (the result is then the identity)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        for reducer in &self.reducers {
            reducer.reduce(state, action.clone(), env);
        }
    }
}

/// Scopes a reducer to one field of a larger state.
///
/// `lens` borrows the field out of the parent state; the child reducer then
/// works on it in place. Other fields are never touched.
pub fn scope_reducer<S, R>(reducer: R, lens: fn(&mut S) -> &mut R::State) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer { reducer, lens }
}

/// A scoped reducer that operates on one field of a parent state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    R: Reducer,
{
    reducer: R,
    lens: fn(&mut S) -> &mut R::State,
}

impl<S, R> Reducer for ScopedReducer<S, R>
where
    R: Reducer,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        self.reducer.reduce((self.lens)(state), action, env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        counter: i64,
        name: String,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = i64;
        type Action = TestAction;
        type Environment = ();

        fn reduce(&self, counter: &mut i64, action: TestAction, _env: &()) {
            match action {
                TestAction::Increment => *counter += 1,
                TestAction::Decrement => *counter -= 1,
                TestAction::SetName(_) => {},
            }
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = String;
        type Action = TestAction;
        type Environment = ();

        fn reduce(&self, name: &mut String, action: TestAction, _env: &()) {
            if let TestAction::SetName(new_name) = action {
                *name = new_name;
            }
        }
    }

    fn counter_first() -> CombinedReducer<TestState, TestAction, ()> {
        combine_reducers(vec![
            Box::new(scope_reducer(CounterReducer, |s: &mut TestState| &mut s.counter)),
            Box::new(scope_reducer(NameReducer, |s: &mut TestState| &mut s.name)),
        ])
    }

    fn name_first() -> CombinedReducer<TestState, TestAction, ()> {
        combine_reducers(vec![
            Box::new(scope_reducer(NameReducer, |s: &mut TestState| &mut s.name)),
            Box::new(scope_reducer(CounterReducer, |s: &mut TestState| &mut s.counter)),
        ])
    }

    #[test]
    fn test_combine_reducers() {
        let combined = counter_first();
        assert_eq!(combined.len(), 2);

        let mut state = TestState::default();

        combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);

        combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");

        combined.reduce(&mut state, TestAction::Decrement, &());
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
    }

    #[test]
    fn test_empty_combination_is_identity() {
        let combined: CombinedReducer<TestState, TestAction, ()> = combine_reducers(Vec::new());
        assert!(combined.is_empty());

        let state = TestState {
            counter: 7,
            name: "kept".to_string(),
        };
        let next = combined.apply(&state, TestAction::Increment, &());
        assert_eq!(next, state);
    }

    #[test]
    fn test_scope_reducer_leaves_other_fields() {
        let scoped = scope_reducer(CounterReducer, |s: &mut TestState| &mut s.counter);

        let mut state = TestState {
            counter: 5,
            name: "test".to_string(),
        };

        scoped.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 6);
        assert_eq!(state.name, "test");

        scoped.reduce(&mut state, TestAction::SetName("ignored".to_string()), &());
        assert_eq!(state.counter, 6);
        assert_eq!(state.name, "test");
    }

    fn action_strategy() -> impl Strategy<Value = TestAction> {
        prop_oneof![
            Just(TestAction::Increment),
            Just(TestAction::Decrement),
            "[a-z]{0,8}".prop_map(TestAction::SetName),
        ]
    }

    proptest! {
        #[test]
        fn slice_order_does_not_matter(actions in prop::collection::vec(action_strategy(), 0..32)) {
            let (a, b) = (counter_first(), name_first());
            let mut left = TestState::default();
            let mut right = TestState::default();

            for action in actions {
                a.reduce(&mut left, action.clone(), &());
                b.reduce(&mut right, action, &());
            }

            prop_assert_eq!(left, right);
        }
    }
}
