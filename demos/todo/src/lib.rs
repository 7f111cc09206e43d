//! To-do list state container built on slicestore.
//!
//! The state is split into three slices, each reduced independently:
//!
//! - `todos`: the ordered list (create, edit, toggle, delete)
//! - `selected_todo`: the currently selected id (select)
//! - `counter`: how many mutations have been applied
//!
//! Edits, toggles and deletes naming an unknown id leave the list unchanged
//! but still count as mutations.
//!
//! # Quick Start
//!
//! ```
//! use slicestore_core::environment::UuidGenerator;
//! use todo::actions::{create_todo, select_todo, toggle_todo};
//! use todo::{new_store, AppState, TodoAction};
//!
//! let store = new_store(AppState::seeded(&UuidGenerator));
//!
//! let create = create_todo("Buy milk");
//! let TodoAction::CreateTodo(todo) = &create else { unreachable!() };
//! let id = todo.id.clone();
//!
//! store.dispatch(create);
//! store.dispatch(toggle_todo(id.clone(), true));
//! store.dispatch(select_todo(id.clone()));
//!
//! let state = store.snapshot();
//! assert_eq!(state.todos.len(), 4);
//! assert_eq!(state.selected_todo, Some(id));
//! assert_eq!(state.counter, 2);
//! ```

pub mod actions;
pub mod config;
pub mod reducer;
pub mod types;

use slicestore_runtime::Store;

// Re-export commonly used types
pub use reducer::{app_reducer, AppReducer, CounterReducer, SelectionReducer, TodosReducer};
pub use types::{AppState, Todo, TodoAction, TodoId};

/// Store holding the to-do [`AppState`]
pub type TodoStore = Store<AppState, TodoAction, (), AppReducer>;

/// Store over `initial` driven by [`app_reducer`]
#[must_use]
pub fn new_store(initial: AppState) -> TodoStore {
    Store::new(initial, app_reducer(), ())
}
