use crate::commands::helpers::{apply_to_ids, map_one};
use crate::commands::CmdResult;
use crate::model::Todo;
use crate::store::{StorageBackend, TodoStore};
use chrono::{DateTime, Utc};

/// Puts the todo in today's bucket: open, not deleted, marked now, and
/// counted once more. Calling it again on the same day counts again.
pub fn to_today(todos: &[Todo], id: &str, now: DateTime<Utc>) -> Vec<Todo> {
    map_one(todos, id, |t| {
        t.is_done = false;
        t.date_deleted = None;
        t.date_marked_as_to_be_done_today = Some(now);
        t.number_of_times_marked_as_to_be_done_today =
            t.number_of_times_marked_as_to_be_done_today.saturating_add(1);
    })
}

/// Puts the todo back in the backlog: open, not deleted, no today mark. The
/// times-marked counter is kept.
pub fn to_backlog(todos: &[Todo], id: &str) -> Vec<Todo> {
    map_one(todos, id, |t| {
        t.is_done = false;
        t.date_deleted = None;
        t.date_marked_as_to_be_done_today = None;
    })
}

pub fn run_to_today<B: StorageBackend>(store: &mut TodoStore<B>, ids: &[String]) -> CmdResult {
    let now = Utc::now();
    apply_to_ids(store, ids, "Moved to today", |todos, id| to_today(todos, id, now))
}

pub fn run_to_backlog<B: StorageBackend>(store: &mut TodoStore<B>, ids: &[String]) -> CmdResult {
    apply_to_ids(store, ids, "Moved to backlog", to_backlog)
}
