//! # Slicestore Testing
//!
//! Testing utilities and helpers for slicestore.
//!
//! This crate provides:
//! - Predictable implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - A listener that records every published snapshot ([`SnapshotRecorder`])
//! - Opt-in tracing output for tests
//!
//! ## Example
//!
//! ```ignore
//! use slicestore_testing::{SequentialIdGenerator, SnapshotRecorder};
//!
//! #[test]
//! fn test_create_flow() {
//!     let ids = SequentialIdGenerator::new();
//!     let store = Store::new(AppState::default(), app_reducer(), ());
//!     let recorder = SnapshotRecorder::attach(&store);
//!
//!     store.dispatch(create_todo_with(&ids, "Buy milk"));
//!
//!     assert_eq!(recorder.len(), 1);
//! }
//! ```


pub use reducer_test::ReducerTest;

/// Mock implementations of Environment traits
pub mod mocks {
    use slicestore_core::environment::IdGenerator;
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Id generator handing out `1, 2, 3, …` as UUIDs
    ///
    /// Makes generated ids predictable in tests.
    ///
    /// # Example
    ///
    /// ```
    /// use slicestore_core::environment::IdGenerator;
    /// use slicestore_testing::mocks::SequentialIdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id().to_string(), "00000000-0000-0000-0000-000000000001");
    /// assert_eq!(ids.next_id().as_u128(), 2);
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        issued: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                issued: AtomicU64::new(0),
            }
        }

        /// Create a generator whose first id is `start`
        #[must_use]
        pub const fn starting_at(start: u64) -> Self {
            Self {
                issued: AtomicU64::new(start.saturating_sub(1)),
            }
        }

        /// Number of ids handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.issued.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u128(u128::from(n))
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use slicestore_core::reducer::Reducer;
    use slicestore_runtime::{Store, Subscription};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Records every state a store publishes
    ///
    /// Subscribes to the store on [`SnapshotRecorder::attach`] and keeps a
    /// clone of each new state.
    pub struct SnapshotRecorder<S> {
        snapshots: Arc<Mutex<Vec<S>>>,
        subscription: Subscription<S>,
    }

    impl<S> SnapshotRecorder<S>
    where
        S: Clone + Send + 'static,
    {
        /// Subscribe a new recorder to `store`
        pub fn attach<A, E, R>(store: &Store<S, A, E, R>) -> Self
        where
            R: Reducer<State = S, Action = A, Environment = E>,
            A: Clone,
        {
            let snapshots = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&snapshots);

            let subscription = store.subscribe(move |state: &S| {
                sink.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(state.clone());
            });

            Self {
                snapshots,
                subscription,
            }
        }

        /// All recorded states, oldest first
        #[must_use]
        pub fn snapshots(&self) -> Vec<S> {
            self.snapshots
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recently recorded state
        #[must_use]
        pub fn last(&self) -> Option<S> {
            self.snapshots
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }

        /// Number of recorded states
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Whether nothing was recorded yet
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Stop recording and return what was recorded
        ///
        /// If the store is already gone there is nothing left to unsubscribe
        /// from, so the result of the unsubscribe is not reported.
        #[must_use]
        pub fn detach(self) -> Vec<S> {
            let Self {
                snapshots,
                subscription,
            } = self;
            let _ = subscription.unsubscribe();

            snapshots
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    /// Install a `tracing` subscriber writing through the test harness
    ///
    /// Honors `RUST_LOG`; safe to call from several tests.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "slicestore_runtime=trace".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, SnapshotRecorder};
pub use mocks::SequentialIdGenerator;
