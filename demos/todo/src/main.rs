//! Simple CLI demo for the to-do store.
//!
//! Walks through create, toggle, edit, select and delete, printing the list
//! after every dispatch.

use slicestore_core::environment::UuidGenerator;
use slicestore_runtime::ActionLogger;
use todo::actions::{create_todo, delete_todo, edit_todo, select_todo, toggle_todo};
use todo::config::Config;
use todo::{new_store, AppState, TodoAction, TodoId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render(state: &AppState) {
    println!("  ({} mutations)", state.counter);
    for todo in &state.todos {
        let status = if todo.is_complete { "✓" } else { " " };
        let cursor = if state.selected_todo.as_ref() == Some(&todo.id) { ">" } else { " " };
        println!("  {cursor} [{status}] {}", todo.desc);
    }
    if let Some(selected) = &state.selected_todo {
        if state.get(selected).is_none() {
            println!("  (selected todo {selected} no longer exists)");
        }
    }
}

fn created_id(action: &TodoAction) -> Option<TodoId> {
    match action {
        TodoAction::CreateTodo(todo) => Some(todo.id.clone()),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== To-do Store Demo ===\n");

    let initial = if config.seed {
        AppState::seeded(&UuidGenerator)
    } else {
        AppState::default()
    };

    let mut store = new_store(initial);
    if config.log_actions {
        store = store.with_middleware(ActionLogger);
    }

    let _renderer = store.subscribe(render);

    println!("Initial state:");
    store.state(render);

    println!("\n>>> create \"Buy milk\"");
    let create = create_todo("Buy milk");
    let milk = created_id(&create).ok_or("create_todo did not build a CreateTodo action")?;
    store.dispatch(create);

    println!("\n>>> toggle \"Buy milk\" complete");
    store.dispatch(toggle_todo(milk.clone(), true));

    println!("\n>>> edit \"Buy milk\"");
    store.dispatch(edit_todo(milk.clone(), "Buy oat milk"));

    println!("\n>>> select \"Buy oat milk\"");
    store.dispatch(select_todo(milk.clone()));

    println!("\n>>> delete \"Buy oat milk\"");
    store.dispatch(delete_todo(milk));

    let state = store.snapshot();
    tracing::info!(
        todos = state.todos.len(),
        completed = state.completed_count(),
        counter = state.counter,
        dispatched = store.dispatch_count(),
        "Demo finished"
    );

    if config.print_json {
        println!("\n{}", serde_json::to_string_pretty(&*state)?);
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
