//! # Slicestore Runtime
//!
//! Runtime implementation for slicestore.
//!
//! This crate provides the [`Store`] that owns the current state, runs the
//! reducer for every dispatched action and tells observers about the result.
//!
//! ## Core Components
//!
//! - **Store**: holds the current state snapshot and serializes dispatch
//! - **Subscriptions**: callbacks invoked after every dispatch
//! - **Watch channel**: a snapshot feed for async consumers
//! - **Middleware**: observers wrapped around every dispatch (e.g. [`ActionLogger`])
//!
//! ## Example
//!
//! ```
//! use slicestore_core::reducer::Reducer;
//! use slicestore_runtime::Store;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Clicks {
//!     total: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Click;
//!
//! struct ClickReducer;
//!
//! impl Reducer for ClickReducer {
//!     type State = Clicks;
//!     type Action = Click;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Clicks, _action: Click, _env: &()) {
//!         state.total += 1;
//!     }
//! }
//!
//! let store = Store::new(Clicks::default(), ClickReducer, ());
//! let before = store.snapshot();
//!
//! store.dispatch(Click);
//!
//! assert_eq!(before.total, 0);
//! assert_eq!(store.state(|s| s.total), 1);
//! ```

use slicestore_core::reducer::Reducer;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::thread::ThreadId;

/// Dispatch middleware (observers around every dispatch)
pub mod middleware;

pub use middleware::{ActionLogger, Middleware};
pub use store::{Store, Subscription};

/// Callback invoked with the new state after a dispatch
pub type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Registered listeners, in registration order
struct ListenerRegistry<S> {
    next_id: u64,
    entries: Vec<(u64, Listener<S>)>,
}

impl<S> ListenerRegistry<S> {
    const fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, listener: Listener<S>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Actions dispatched by listeners while a dispatch is still notifying
struct DispatchQueue<A> {
    /// Thread currently running a dispatch cycle
    owner: Option<ThreadId>,
    pending: VecDeque<A>,
}

impl<A> DispatchQueue<A> {
    const fn new() -> Self {
        Self {
            owner: None,
            pending: VecDeque::new(),
        }
    }
}

/// Releases the dispatch queue when a cycle ends, including by panic
struct CycleGuard<'a, A> {
    queue: &'a Mutex<DispatchQueue<A>>,
}

impl<A> Drop for CycleGuard<'_, A> {
    fn drop(&mut self) {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.owner = None;
        queue.pending.clear();
    }
}

/// Store module - the stateful owner of the aggregate state
pub mod store {
    use super::{
        Arc, AtomicU64, CycleGuard, DispatchQueue, Listener, ListenerRegistry, Middleware, Mutex,
        Ordering, PoisonError, Reducer, Weak,
    };
    use tokio::sync::watch;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (an immutable `Arc` snapshot, replaced on every dispatch)
    /// 2. Reducer (the aggregate state transition)
    /// 3. Environment (injected dependencies)
    /// 4. Observers (middleware, listeners, watch receivers)
    ///
    /// Dispatch is synchronous: the reducer pass, publication and
    /// notification all finish before [`Store::dispatch`] returns.
    /// Snapshots handed out earlier are never modified.
    ///
    /// Dispatch cycles never interleave. Every listener sees the states in
    /// publication order, and the last state it sees is the current one.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Mutex<Arc<S>>,
        reducer: R,
        environment: E,
        middleware: Vec<Box<dyn Middleware<S, A>>>,
        listeners: Arc<Mutex<ListenerRegistry<S>>>,
        snapshots: watch::Sender<Arc<S>>,
        dispatched: AtomicU64,
        cycle: Mutex<()>,
        queue: Mutex<DispatchQueue<A>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
        A: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let initial = Arc::new(initial_state);
            let (snapshots, _) = watch::channel(Arc::clone(&initial));

            Self {
                state: Mutex::new(initial),
                reducer,
                environment,
                middleware: Vec::new(),
                listeners: Arc::new(Mutex::new(ListenerRegistry::new())),
                snapshots,
                dispatched: AtomicU64::new(0),
                cycle: Mutex::new(()),
                queue: Mutex::new(DispatchQueue::new()),
            }
        }

        /// Add a middleware; middleware runs in the order it was added
        #[must_use]
        pub fn with_middleware<M>(mut self, middleware: M) -> Self
        where
            M: Middleware<S, A> + 'static,
        {
            self.middleware.push(Box::new(middleware));
            self
        }

        /// Dispatch an action
        ///
        /// Runs `before_dispatch` middleware, reduces a private copy of the
        /// current snapshot, publishes it, runs `after_dispatch` middleware and
        /// finally calls every listener with the new state.
        ///
        /// A listener may dispatch again. That action is queued and reduced
        /// once every listener has seen the current state, before the outer
        /// `dispatch` returns. The nested call itself returns immediately.
        /// Dispatches from other threads wait for the running cycle to finish.
        #[tracing::instrument(skip_all, name = "store_dispatch")]
        pub fn dispatch(&self, action: A) {
            let current = std::thread::current().id();
            {
                let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
                if queue.owner == Some(current) {
                    queue.pending.push_back(action);
                    tracing::trace!(queued = queue.pending.len(), "Nested dispatch queued");
                    return;
                }
            }

            let _cycle = self.cycle.lock().unwrap_or_else(PoisonError::into_inner);
            self.queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .owner = Some(current);
            let _guard = CycleGuard { queue: &self.queue };

            let mut next_action = Some(action);
            while let Some(action) = next_action {
                self.process(action);
                next_action = self
                    .queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pending
                    .pop_front();
            }
        }

        fn process(&self, action: A) {
            let (previous, next) = {
                let mut current = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                let previous = Arc::clone(&current);

                for middleware in &self.middleware {
                    middleware.before_dispatch(&previous, &action);
                }

                let start = std::time::Instant::now();
                let mut draft = S::clone(&previous);
                self.reducer.reduce(&mut draft, action.clone(), &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                let next = Arc::new(draft);
                *current = Arc::clone(&next);
                self.snapshots.send_replace(Arc::clone(&next));
                (previous, next)
            };

            let sequence = self.dispatched.fetch_add(1, Ordering::Relaxed) + 1;
            metrics::counter!("store.actions.total").increment(1);
            tracing::trace!(sequence, "State published");

            for middleware in &self.middleware {
                middleware.after_dispatch(&previous, &action, &next);
            }

            self.notify(&next);
        }

        fn notify(&self, state: &S) {
            let listeners: Vec<Listener<S>> = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();

            for listener in &listeners {
                listener(state);
            }

            metrics::counter!("store.listeners.notified").increment(listeners.len() as u64);
        }

        /// Current state snapshot
        ///
        /// The snapshot is immutable and stays valid (and unchanged) after
        /// later dispatches.
        #[must_use]
        pub fn snapshot(&self) -> Arc<S> {
            Arc::clone(&self.state.lock().unwrap_or_else(PoisonError::into_inner))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let open = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let snapshot = self.snapshot();
            f(&snapshot)
        }

        /// Register a listener called after every dispatch
        ///
        /// Returns a [`Subscription`] handle to deregister it. Dropping the
        /// handle keeps the listener registered.
        pub fn subscribe<F>(&self, listener: F) -> Subscription<S>
        where
            F: Fn(&S) + Send + Sync + 'static,
        {
            let id = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(Arc::new(listener));

            tracing::trace!(listener = id, "Listener subscribed");

            Subscription {
                id,
                registry: Arc::downgrade(&self.listeners),
            }
        }

        /// Receiver that always holds the latest published snapshot
        ///
        /// Lets async consumers `await` state changes instead of registering
        /// a callback.
        #[must_use]
        pub fn watch(&self) -> watch::Receiver<Arc<S>> {
            self.snapshots.subscribe()
        }

        /// Number of actions dispatched through this store
        #[must_use]
        pub fn dispatch_count(&self) -> u64 {
            self.dispatched.load(Ordering::Relaxed)
        }

        /// Number of currently registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .len()
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let state = Arc::clone(&self.state.lock().unwrap_or_else(PoisonError::into_inner));
            f.debug_struct("Store")
                .field("state", &state)
                .field("middleware", &self.middleware.len())
                .field("dispatched", &self.dispatched.load(Ordering::Relaxed))
                .finish_non_exhaustive()
        }
    }

    /// Handle returned by [`Store::subscribe`]
    pub struct Subscription<S> {
        id: u64,
        registry: Weak<Mutex<ListenerRegistry<S>>>,
    }

    impl<S> Subscription<S> {
        /// Deregister the listener
        ///
        /// Returns `false` if the store no longer exists. A notification
        /// already in progress still reaches the listener; later dispatches
        /// do not.
        pub fn unsubscribe(self) -> bool {
            let Some(registry) = self.registry.upgrade() else {
                return false;
            };

            let removed = registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(self.id);

            if removed {
                tracing::trace!(listener = self.id, "Listener unsubscribed");
            }
            removed
        }

        /// Whether the listener is still registered with a live store
        #[must_use]
        pub fn is_active(&self) -> bool {
            self.registry.upgrade().is_some_and(|registry| {
                registry
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .contains(self.id)
            })
        }
    }

    impl<S> std::fmt::Debug for Subscription<S> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Subscription").field("id", &self.id).finish()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        value: i64,
        history: Vec<i64>,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Add(i64),
        Noop,
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(&self, state: &mut TestState, action: TestAction, _env: &()) {
            match action {
                TestAction::Add(n) => {
                    state.value += n;
                    state.history.push(n);
                },
                TestAction::Noop => {},
            }
        }
    }

    fn store() -> Store<TestState, TestAction, (), TestReducer> {
        Store::new(TestState::default(), TestReducer, ())
    }

    #[test]
    fn test_dispatch_replaces_state() {
        let store = store();

        store.dispatch(TestAction::Add(2));
        store.dispatch(TestAction::Add(3));

        assert_eq!(store.state(|s| s.value), 5);
        assert_eq!(store.state(|s| s.history.clone()), vec![2, 3]);
        assert_eq!(store.dispatch_count(), 2);
    }

    #[test]
    fn test_previous_snapshots_stay_valid() {
        let store = store();
        store.dispatch(TestAction::Add(1));
        let before = store.snapshot();

        store.dispatch(TestAction::Add(10));

        assert_eq!(before.value, 1);
        assert_eq!(before.history, vec![1]);
        assert_eq!(store.snapshot().value, 11);
    }

    #[test]
    fn test_unhandled_action_publishes_equal_state() {
        let store = store();
        store.dispatch(TestAction::Add(4));
        let before = store.snapshot();

        store.dispatch(TestAction::Noop);

        assert_eq!(*store.snapshot(), *before);
        assert_eq!(store.dispatch_count(), 2);
    }

    #[test]
    fn test_listener_sees_new_state() {
        let store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let _subscription = store.subscribe(move |state: &TestState| {
            sink.lock().unwrap().push(state.value);
        });

        store.dispatch(TestAction::Add(1));
        store.dispatch(TestAction::Noop);
        store.dispatch(TestAction::Add(5));

        assert_eq!(*seen.lock().unwrap(), vec![1, 1, 6]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let subscription = store.subscribe(move |_: &TestState| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(subscription.is_active());
        assert_eq!(store.listener_count(), 1);

        store.dispatch(TestAction::Add(1));
        assert!(subscription.unsubscribe());
        store.dispatch(TestAction::Add(1));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_after_store_dropped() {
        let store = store();
        let subscription = store.subscribe(|_: &TestState| {});
        drop(store);

        assert!(!subscription.is_active());
        assert!(!subscription.unsubscribe());
    }
}
