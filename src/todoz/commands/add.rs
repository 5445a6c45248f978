use crate::commands::helpers::{commit, find};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::Todo;
use crate::store::{StorageBackend, TodoStore};
use chrono::Local;
use tracing::warn;

/// Appends `todo`. An id that is already taken leaves the list unchanged.
pub fn apply(todos: &[Todo], todo: Todo) -> Vec<Todo> {
    let mut next = todos.to_vec();
    if find(todos, &todo.id).is_none() {
        next.push(todo);
    }
    next
}

pub fn run<B: StorageBackend>(store: &mut TodoStore<B>, todo: Todo) -> CmdResult {
    let mut result = CmdResult::default();

    if find(store.get(), &todo.id).is_some() {
        warn!(id = %todo.id, "refusing to add a todo with a duplicate id");
        result.add_message(CmdMessage::error(format!(
            "A todo with id {} already exists",
            todo.id
        )));
        return result;
    }

    let next = apply(store.get(), todo.clone());
    commit(store, next, &mut result);
    let bucket = if todo.is_marked_for(&Local::now()) {
        "today"
    } else {
        "backlog"
    };
    result.add_message(CmdMessage::success(format!(
        "Added to {}: {}",
        bucket, todo.title
    )));
    result.affected_todos.push(todo);
    result
}
