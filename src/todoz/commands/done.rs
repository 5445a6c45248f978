use crate::commands::helpers::{apply_to_ids, map_one};
use crate::commands::CmdResult;
use crate::model::Todo;
use crate::store::{StorageBackend, TodoStore};

pub fn mark(todos: &[Todo], id: &str) -> Vec<Todo> {
    map_one(todos, id, |t| t.is_done = true)
}

pub fn unmark(todos: &[Todo], id: &str) -> Vec<Todo> {
    map_one(todos, id, |t| t.is_done = false)
}

pub fn run_mark<B: StorageBackend>(store: &mut TodoStore<B>, ids: &[String]) -> CmdResult {
    apply_to_ids(store, ids, "Done", mark)
}

pub fn run_unmark<B: StorageBackend>(store: &mut TodoStore<B>, ids: &[String]) -> CmdResult {
    apply_to_ids(store, ids, "Not done", unmark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn mark_only_touches_is_done() {
        let fx = StoreFixture::new().with_today("1");
        let before = fx.find("1").unwrap().clone();

        let next = mark(fx.store.get(), "1");

        let after = &next[0];
        assert!(after.is_done);
        assert_eq!(after.date_marked_as_to_be_done_today, before.date_marked_as_to_be_done_today);
        assert_eq!(
            after.number_of_times_marked_as_to_be_done_today,
            before.number_of_times_marked_as_to_be_done_today
        );
        assert_eq!(after.date_deleted, None);
    }

    #[test]
    fn unmark_keeps_soft_delete() {
        let fx = StoreFixture::new().with_todo("1", |t| {
            t.is_done = true;
            t.date_deleted = Some(chrono::Utc::now());
        });

        let next = unmark(fx.store.get(), "1");

        assert!(!next[0].is_done);
        assert!(next[0].is_deleted());
    }

    #[test]
    fn run_marks_several_and_skips_unknown() {
        let mut fx = StoreFixture::new().with_backlog("1").with_backlog("2");
        let ids = vec!["1".to_string(), "ghost".to_string(), "2".to_string()];

        let result = run_mark(&mut fx.store, &ids);

        assert_eq!(result.affected_todos.len(), 2);
        assert!(fx.store.get().iter().all(|t| t.is_done));

        run_unmark(&mut fx.store, &ids[..1]);
        assert!(!fx.find("1").unwrap().is_done);
        assert!(fx.find("2").unwrap().is_done);
    }
}
