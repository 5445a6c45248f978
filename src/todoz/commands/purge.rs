use crate::commands::helpers::{commit, find};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::Todo;
use crate::store::{StorageBackend, TodoStore};
use tracing::debug;

/// Removes the record with `id`, but only when it is soft-deleted.
pub fn hard_delete_single(todos: &[Todo], id: &str) -> Vec<Todo> {
    todos
        .iter()
        .filter(|t| !(t.id == id && t.is_deleted()))
        .cloned()
        .collect()
}

/// Removes every soft-deleted record.
pub fn hard_delete_all_deleted(todos: &[Todo]) -> Vec<Todo> {
    todos.iter().filter(|t| !t.is_deleted()).cloned().collect()
}

/// Permanently removes the given todos, or every deleted todo when `ids` is
/// empty. Todos that are not soft-deleted are left in place.
pub fn run<B: StorageBackend>(store: &mut TodoStore<B>, ids: &[String]) -> CmdResult {
    let mut result = CmdResult::default();
    let mut current = store.get().to_vec();

    if ids.is_empty() {
        let doomed: Vec<Todo> = current.iter().filter(|t| t.is_deleted()).cloned().collect();
        if doomed.is_empty() {
            result.add_message(CmdMessage::info("No deleted todos to purge."));
            return result;
        }
        current = hard_delete_all_deleted(&current);
        for todo in &doomed {
            result.add_message(CmdMessage::success(format!("Purged: {}", todo.title)));
        }
        result.affected_todos = doomed;
    } else {
        for id in ids {
            match find(&current, id) {
                None => {
                    result.add_message(CmdMessage::info(format!("No todo with id {}", id)));
                }
                Some(todo) if !todo.is_deleted() => {
                    result.add_message(CmdMessage::warning(format!(
                        "Not deleted, skipping: {} (delete it first)",
                        todo.title
                    )));
                }
                Some(todo) => {
                    result.add_message(CmdMessage::success(format!("Purged: {}", todo.title)));
                    result.affected_todos.push(todo.clone());
                    current = hard_delete_single(&current, id);
                }
            }
        }
        if result.affected_todos.is_empty() {
            return result;
        }
    }

    debug!(count = result.affected_todos.len(), "purging todos");
    commit(store, current, &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn single_purge_requires_soft_delete() {
        let fx = StoreFixture::new().with_backlog("live").with_deleted("gone");

        let next = hard_delete_single(fx.store.get(), "live");
        assert_eq!(next.len(), 2);

        let next = hard_delete_single(&next, "gone");
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "live");
    }

    #[test]
    fn purge_all_removes_only_deleted() {
        let mut fx = StoreFixture::new()
            .with_deleted("x1")
            .with_backlog("keep")
            .with_deleted("x2");

        let result = run(&mut fx.store, &[]);

        assert_eq!(result.affected_todos.len(), 2);
        assert_eq!(fx.ids(), vec!["keep".to_string()]);
    }

    #[test]
    fn purge_by_id_skips_live_todos() {
        let mut fx = StoreFixture::new().with_backlog("live").with_deleted("gone");

        let result = run(&mut fx.store, &["live".to_string(), "gone".to_string()]);

        assert_eq!(result.affected_todos.len(), 1);
        assert_eq!(fx.ids(), vec!["live".to_string()]);
        assert!(result.has_level(crate::commands::MessageLevel::Warning));
    }

    #[test]
    fn nothing_to_purge_is_reported() {
        let mut fx = StoreFixture::new().with_backlog("live");
        let generation = fx.store.generation();

        let result = run(&mut fx.store, &[]);

        assert_eq!(result.messages[0].content, "No deleted todos to purge.");
        assert_eq!(fx.store.generation(), generation);
    }
}
