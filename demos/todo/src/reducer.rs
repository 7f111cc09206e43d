//! Reducers for the to-do list.
//!
//! Three slice reducers, each owning one field of [`AppState`], combined into
//! the aggregate [`app_reducer`]. None of them fails: an id that matches no
//! todo leaves the list as it was.

use crate::types::{AppState, Todo, TodoAction, TodoId};
use slicestore_core::composition::{combine_reducers, scope_reducer, CombinedReducer};
use slicestore_core::reducer::Reducer;

/// The aggregate reducer type
pub type AppReducer = CombinedReducer<AppState, TodoAction, ()>;

/// Builds the aggregate reducer over [`AppState`]
///
/// Each slice reducer only sees its own field; their order is irrelevant.
#[must_use]
pub fn app_reducer() -> AppReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(TodosReducer, |state: &mut AppState| &mut state.todos)),
        Box::new(scope_reducer(SelectionReducer, |state: &mut AppState| {
            &mut state.selected_todo
        })),
        Box::new(scope_reducer(CounterReducer, |state: &mut AppState| &mut state.counter)),
    ])
}

/// Reducer for the todo list slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer;

impl TodosReducer {
    fn find_mut<'a>(todos: &'a mut [Todo], id: &TodoId) -> Option<&'a mut Todo> {
        todos.iter_mut().find(|todo| &todo.id == id)
    }
}

impl Reducer for TodosReducer {
    type State = Vec<Todo>;
    type Action = TodoAction;
    type Environment = ();

    fn reduce(&self, todos: &mut Vec<Todo>, action: TodoAction, _env: &()) {
        match action {
            TodoAction::CreateTodo(todo) => todos.push(todo),
            TodoAction::EditTodo { id, desc } => {
                if let Some(todo) = Self::find_mut(todos, &id) {
                    todo.desc = desc;
                }
            },
            TodoAction::ToggleTodo { id, is_complete } => {
                if let Some(todo) = Self::find_mut(todos, &id) {
                    todo.is_complete = is_complete;
                }
            },
            TodoAction::DeleteTodo { id } => {
                if let Some(index) = todos.iter().position(|todo| todo.id == id) {
                    todos.remove(index);
                }
            },
            TodoAction::SelectTodo { .. } => {},
        }
    }
}

/// Reducer for the selected todo slice
///
/// Deleting a todo does not reach this slice, so a deleted selection stays
/// selected.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionReducer;

impl Reducer for SelectionReducer {
    type State = Option<TodoId>;
    type Action = TodoAction;
    type Environment = ();

    fn reduce(&self, selected: &mut Option<TodoId>, action: TodoAction, _env: &()) {
        match action {
            TodoAction::SelectTodo { id } => *selected = Some(id),
            TodoAction::CreateTodo(_)
            | TodoAction::EditTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => {},
        }
    }
}

/// Reducer for the mutation counter slice
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = u64;
    type Action = TodoAction;
    type Environment = ();

    fn reduce(&self, counter: &mut u64, action: TodoAction, _env: &()) {
        if action.is_mutation() {
            *counter += 1;
        }
    }
}
