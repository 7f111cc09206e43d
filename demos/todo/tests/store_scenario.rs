//! End-to-end tests for the to-do store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use serde_json::json;
use slicestore_runtime::ActionLogger;
use slicestore_testing::{init_test_tracing, SequentialIdGenerator, SnapshotRecorder};
use todo::actions::{create_todo_with, delete_todo, edit_todo, select_todo, toggle_todo};
use todo::{new_store, AppState, TodoAction, TodoId};

fn created_id(action: &TodoAction) -> TodoId {
    match action {
        TodoAction::CreateTodo(todo) => todo.id.clone(),
        other => panic!("expected CreateTodo, got {other:?}"),
    }
}

#[test]
fn test_seed_create_toggle_delete_select() {
    init_test_tracing();
    let ids = SequentialIdGenerator::new();
    let store = new_store(AppState::seeded(&ids)).with_middleware(ActionLogger);

    let initial = store.snapshot();
    assert_eq!(initial.todos.len(), 3);
    assert_eq!(initial.counter, 0);
    assert_eq!(initial.selected_todo, None);

    // create
    let create = create_todo_with(&ids, "Buy milk");
    let milk = created_id(&create);
    store.dispatch(create);

    let state = store.snapshot();
    assert_eq!(state.todos.len(), 4);
    let last = state.todos.last().unwrap();
    assert_eq!(last.desc, "Buy milk");
    assert!(!last.is_complete);
    assert_eq!(state.counter, 1);

    // toggle
    store.dispatch(toggle_todo(milk.clone(), true));
    let state = store.snapshot();
    assert!(state.get(&milk).unwrap().is_complete);
    assert_eq!(state.counter, 2);

    // delete
    store.dispatch(delete_todo(milk.clone()));
    let state = store.snapshot();
    assert_eq!(state.todos.len(), 3);
    assert!(state.get(&milk).is_none());
    assert_eq!(state.counter, 3);

    // select
    let existing = state.todos[1].id.clone();
    store.dispatch(select_todo(existing.clone()));
    let state = store.snapshot();
    assert_eq!(state.selected_todo, Some(existing));
    assert_eq!(state.counter, 3);

    // the seed snapshot was never touched
    assert_eq!(initial.todos.len(), 3);
    assert_eq!(initial.counter, 0);
    assert_eq!(store.dispatch_count(), 4);
}

#[test]
fn test_listeners_see_every_state() {
    let ids = SequentialIdGenerator::new();
    let store = new_store(AppState::default());
    let recorder = SnapshotRecorder::attach(&store);

    let create = create_todo_with(&ids, "Write docs");
    let docs = created_id(&create);
    store.dispatch(create);
    store.dispatch(edit_todo(docs.clone(), "Write better docs"));
    store.dispatch(select_todo(docs.clone()));

    let states = recorder.detach();
    store.dispatch(delete_todo(docs.clone()));

    assert_eq!(states.len(), 3);
    assert_eq!(states[0].todos[0].desc, "Write docs");
    assert_eq!(states[1].todos[0].desc, "Write better docs");
    assert_eq!(states[2].selected_todo, Some(docs));
    assert_eq!(
        states.iter().map(|s| s.counter).collect::<Vec<_>>(),
        vec![1, 2, 2]
    );
}

#[test]
fn test_unknown_ids_count_but_change_nothing() {
    let store = new_store(AppState::seeded(&SequentialIdGenerator::new()));
    let before = store.snapshot();

    store.dispatch(edit_todo("missing", "x"));
    store.dispatch(toggle_todo("missing", false));
    store.dispatch(delete_todo("missing"));

    let after = store.snapshot();
    assert_eq!(after.todos, before.todos);
    assert_eq!(after.counter, 3);
}

#[test]
fn test_deleted_selection_dangles() {
    let store = new_store(AppState::seeded(&SequentialIdGenerator::new()));
    let target = store.state(|s| s.todos[0].id.clone());

    store.dispatch(select_todo(target.clone()));
    store.dispatch(delete_todo(target.clone()));

    let state = store.snapshot();
    assert_eq!(state.selected_todo, Some(target));
    assert!(state.selected().is_none());
}

#[test]
fn test_watch_receiver_tracks_store() {
    let ids = SequentialIdGenerator::new();
    let store = new_store(AppState::default());
    let rx = store.watch();

    store.dispatch(create_todo_with(&ids, "Ship it"));

    assert_eq!(rx.borrow().todos.len(), 1);
    assert_eq!(rx.borrow().counter, 1);
}

#[test]
fn test_final_state_as_json() {
    let ids = SequentialIdGenerator::new();
    let store = new_store(AppState::default());

    let create = create_todo_with(&ids, "Buy milk");
    let milk = created_id(&create);
    store.dispatch(create);
    store.dispatch(toggle_todo(milk.clone(), true));
    store.dispatch(select_todo(milk));

    assert_eq!(
        serde_json::to_value(&*store.snapshot()).unwrap(),
        json!({
            "todos": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "desc": "Buy milk",
                "isComplete": true,
            }],
            "selectedTodo": "00000000-0000-0000-0000-000000000001",
            "counter": 2,
        })
    );
}

#[test]
fn test_replaying_serialized_actions() {
    let log = json!([
        {"type": "CREATE_TODO", "payload": {"id": "a", "desc": "One", "isComplete": false}},
        {"type": "CREATE_TODO", "payload": {"id": "b", "desc": "Two", "isComplete": false}},
        {"type": "TOGGLE_TODO", "payload": {"id": "a", "isComplete": true}},
        {"type": "DELETE_TODO", "payload": {"id": "b"}},
        {"type": "SELECT_TODO", "payload": {"id": "a"}},
    ]);
    let actions: Vec<TodoAction> = serde_json::from_value(log).unwrap();

    let store = new_store(AppState::default());
    for action in actions {
        store.dispatch(action);
    }

    let state = store.snapshot();
    assert_eq!(state.todos.len(), 1);
    assert!(state.todos[0].is_complete);
    assert_eq!(state.selected_todo, Some(TodoId::new("a")));
    assert_eq!(state.counter, 4);
}
