use crate::commands::{CmdMessage, CmdResult};
use crate::model::Todo;
use crate::store::{PersistStatus, StorageBackend, TodoStore};

pub fn find<'a>(todos: &'a [Todo], id: &str) -> Option<&'a Todo> {
    todos.iter().find(|t| t.id == id)
}

/// Copy of `todos` with `edit` applied to the record with `id`, if any.
pub fn map_one(todos: &[Todo], id: &str, edit: impl FnOnce(&mut Todo)) -> Vec<Todo> {
    let mut next = todos.to_vec();
    if let Some(todo) = next.iter_mut().find(|t| t.id == id) {
        edit(todo);
    }
    next
}

/// Copy of `todos` with `edit` applied to every record matching `predicate`.
pub fn map_where(
    todos: &[Todo],
    predicate: impl Fn(&Todo) -> bool,
    edit: impl Fn(&mut Todo),
) -> Vec<Todo> {
    let mut next = todos.to_vec();
    next.iter_mut().filter(|t| predicate(t)).for_each(edit);
    next
}

/// Writes `next` to the store, surfacing a persistence failure as a warning.
pub fn commit<B: StorageBackend>(store: &mut TodoStore<B>, next: Vec<Todo>, result: &mut CmdResult) {
    if let PersistStatus::NotSaved(reason) = store.set(next) {
        result.add_message(CmdMessage::warning(format!(
            "Changes are kept for now but could not be saved: {}",
            reason
        )));
    }
}

/// Applies `transition` for each id in turn and commits once.
///
/// Ids that match nothing are reported and skipped. `verb` is used in the
/// success message, e.g. "Marked as done".
pub fn apply_to_ids<B: StorageBackend>(
    store: &mut TodoStore<B>,
    ids: &[String],
    verb: &str,
    transition: impl Fn(&[Todo], &str) -> Vec<Todo>,
) -> CmdResult {
    let mut result = CmdResult::default();
    let mut current = store.get().to_vec();
    let mut changed = false;

    for id in ids {
        if find(&current, id).is_none() {
            result.add_message(CmdMessage::info(format!("No todo with id {}", id)));
            continue;
        }
        current = transition(&current, id);
        if let Some(todo) = find(&current, id) {
            result.add_message(CmdMessage::success(format!("{}: {}", verb, todo.title)));
            result.affected_todos.push(todo.clone());
        }
        changed = true;
    }

    if changed {
        commit(store, current, &mut result);
    }
    result
}
