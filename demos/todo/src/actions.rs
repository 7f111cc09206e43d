//! Action constructors.
//!
//! One constructor per operation, each taking only what the caller knows.
//! `create_todo` is the only one with a side effect: it draws a fresh id.

use crate::types::{Todo, TodoAction, TodoId};
use slicestore_core::environment::{IdGenerator, UuidGenerator};

/// New incomplete todo with a fresh time-ordered id
#[must_use]
pub fn create_todo(desc: impl Into<String>) -> TodoAction {
    create_todo_with(&UuidGenerator, desc)
}

/// New incomplete todo with an id drawn from `ids`
#[must_use]
pub fn create_todo_with(ids: &dyn IdGenerator, desc: impl Into<String>) -> TodoAction {
    TodoAction::CreateTodo(Todo::new(TodoId::generate(ids), desc, false))
}

/// Replace the description of `id`
///
/// The id is not checked here; editing an unknown id is a no-op in the reducer.
#[must_use]
pub fn edit_todo(id: impl Into<TodoId>, desc: impl Into<String>) -> TodoAction {
    TodoAction::EditTodo {
        id: id.into(),
        desc: desc.into(),
    }
}

/// Set (not flip) the completion flag of `id`
#[must_use]
pub fn toggle_todo(id: impl Into<TodoId>, is_complete: bool) -> TodoAction {
    TodoAction::ToggleTodo {
        id: id.into(),
        is_complete,
    }
}

/// Remove `id`
#[must_use]
pub fn delete_todo(id: impl Into<TodoId>) -> TodoAction {
    TodoAction::DeleteTodo { id: id.into() }
}

/// Select `id`
#[must_use]
pub fn select_todo(id: impl Into<TodoId>) -> TodoAction {
    TodoAction::SelectTodo { id: id.into() }
}
