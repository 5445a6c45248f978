use crate::commands::helpers::{apply_to_ids, commit, map_one, map_where};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::Todo;
use crate::store::{StorageBackend, TodoStore};
use chrono::{DateTime, Utc};

/// Sets the deletion timestamp and nothing else, so a restore brings back
/// the todo's done and today state as they were.
pub fn soft_delete(todos: &[Todo], id: &str, now: DateTime<Utc>) -> Vec<Todo> {
    map_one(todos, id, |t| t.date_deleted = Some(now))
}

/// Soft-deletes every done todo. Done todos that were already deleted get
/// a fresh timestamp.
pub fn soft_delete_all_done(todos: &[Todo], now: DateTime<Utc>) -> Vec<Todo> {
    map_where(todos, |t| t.is_done, |t| t.date_deleted = Some(now))
}

pub fn run<B: StorageBackend>(store: &mut TodoStore<B>, ids: &[String]) -> CmdResult {
    let now = Utc::now();
    apply_to_ids(store, ids, "Deleted", |todos, id| soft_delete(todos, id, now))
}

pub fn run_all_done<B: StorageBackend>(store: &mut TodoStore<B>) -> CmdResult {
    let mut result = CmdResult::default();
    let done: Vec<Todo> = store.get().iter().filter(|t| t.is_done).cloned().collect();

    if done.is_empty() {
        result.add_message(CmdMessage::info("No done todos to delete."));
        return result;
    }

    let next = soft_delete_all_done(store.get(), Utc::now());
    commit(store, next, &mut result);
    result.add_message(CmdMessage::success(format!(
        "Deleted {} done todo{}",
        done.len(),
        if done.len() == 1 { "" } else { "s" }
    )));
    result.affected_todos = done;
    result
}
