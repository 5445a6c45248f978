use crate::commands::helpers::{commit, find};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::Todo;
use crate::store::{StorageBackend, TodoStore};

/// Replaces the record sharing `updated.id` wholesale.
///
/// Text fields are stored as given; callers run them through
/// [`crate::normalize`] first.
pub fn apply(todos: &[Todo], updated: Todo) -> Vec<Todo> {
    todos
        .iter()
        .map(|t| {
            if t.id == updated.id {
                updated.clone()
            } else {
                t.clone()
            }
        })
        .collect()
}

pub fn run<B: StorageBackend>(store: &mut TodoStore<B>, updated: Todo) -> CmdResult {
    let mut result = CmdResult::default();

    if find(store.get(), &updated.id).is_none() {
        result.add_message(CmdMessage::info(format!("No todo with id {}", updated.id)));
        return result;
    }

    let next = apply(store.get(), updated.clone());
    commit(store, next, &mut result);
    result.add_message(CmdMessage::success(format!("Updated: {}", updated.title)));
    result.affected_todos.push(updated);
    result
}
