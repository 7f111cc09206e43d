//! Domain types for the to-do list.
//!
//! The aggregate state has three independent slices: the ordered list of
//! todos, the currently selected todo id, and a counter of mutations.

use serde::{Deserialize, Serialize};
use slicestore_core::environment::IdGenerator;
use slicestore_macros::Action;
use uuid::Uuid;

/// Unique identifier for a todo item
///
/// Opaque string. Fresh ids come from an [`IdGenerator`]; ids received from
/// callers are taken as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draws a fresh identifier from `ids`
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self::from(ids.next_id())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for TodoId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// Human-readable description
    pub desc: String,
    /// Whether the todo is done
    pub is_complete: bool,
}

impl Todo {
    /// Creates a todo
    #[must_use]
    pub fn new(id: TodoId, desc: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id,
            desc: desc.into(),
            is_complete,
        }
    }
}

/// Descriptions and completion flags of the startup todos
pub const SEED_TODOS: [(&str, bool); 3] = [
    ("Learn React", true),
    ("Learn Redux", true),
    ("Learn Redux-ToolKit", false),
];

/// Aggregate application state
///
/// `selected_todo` only refers to a todo by id. Deleting the selected todo
/// does not clear it, so it may name an id that is no longer in `todos`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Todos in insertion order
    pub todos: Vec<Todo>,
    /// Currently selected todo, if any
    pub selected_todo: Option<TodoId>,
    /// Number of mutations (create/edit/toggle/delete) applied
    pub counter: u64,
}

impl AppState {
    /// Startup state: the three seed todos, nothing selected, counter at zero
    #[must_use]
    pub fn seeded(ids: &dyn IdGenerator) -> Self {
        Self {
            todos: SEED_TODOS
                .iter()
                .map(|&(desc, is_complete)| Todo::new(TodoId::generate(ids), desc, is_complete))
                .collect(),
            selected_todo: None,
            counter: 0,
        }
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// The selected todo, if it still exists
    #[must_use]
    pub fn selected(&self) -> Option<&Todo> {
        self.selected_todo.as_ref().and_then(|id| self.get(id))
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_complete).count()
    }
}

/// Every state change the to-do list accepts
///
/// Serializes as `{"type": "CREATE_TODO", "payload": {...}}`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append a new todo
    #[mutation]
    CreateTodo(Todo),

    /// Replace the description of a todo
    #[mutation]
    EditTodo {
        /// Todo to edit
        id: TodoId,
        /// New description
        desc: String,
    },

    /// Set the completion flag of a todo
    #[mutation]
    ToggleTodo {
        /// Todo to update
        id: TodoId,
        /// New completion flag
        #[serde(rename = "isComplete")]
        is_complete: bool,
    },

    /// Remove a todo
    #[mutation]
    DeleteTodo {
        /// Todo to remove
        id: TodoId,
    },

    /// Mark a todo as selected
    SelectTodo {
        /// Todo to select
        id: TodoId,
    },
}
