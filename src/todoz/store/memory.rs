use super::StorageBackend;
use crate::error::{Result, TodozError};
use std::collections::HashMap;

/// Backend keeping values in a map, for tests and throwaway sessions.
/// Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut backend = Self::new();
        backend.values.insert(key.to_string(), value.to_string());
        backend
    }

    /// Make every subsequent write fail, like a full or disabled storage.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl StorageBackend for InMemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(TodozError::Store("storage quota exceeded".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Todo;
    use crate::store::{TodoStore, DEFAULT_STORAGE_KEY};
    use chrono::{DateTime, Duration, Utc};

    pub struct StoreFixture {
        pub store: TodoStore<InMemoryBackend>,
        now: DateTime<Utc>,
        created: usize,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self::at(Utc::now())
        }

        /// Fixture whose "today" todos are marked at `now`. Each added todo is
        /// created one minute after the previous one, starting a week earlier.
        pub fn at(now: DateTime<Utc>) -> Self {
            Self {
                store: TodoStore::load(InMemoryBackend::new(), DEFAULT_STORAGE_KEY),
                now,
                created: 0,
            }
        }

        fn push(mut self, id: &str, edit: impl FnOnce(&mut Todo)) -> Self {
            let mut todo = Todo::new(format!("Todo {}", id));
            todo.id = id.to_string();
            todo.date_created = self.now - Duration::days(7) + Duration::minutes(self.created as i64);
            self.created += 1;
            edit(&mut todo);

            let mut todos = self.store.get().to_vec();
            todos.push(todo);
            self.store.set(todos);
            self
        }

        pub fn with_backlog(self, id: &str) -> Self {
            self.push(id, |_| {})
        }

        pub fn with_today(self, id: &str) -> Self {
            let now = self.now;
            self.push(id, |t| {
                t.date_marked_as_to_be_done_today = Some(now);
                t.number_of_times_marked_as_to_be_done_today = 1;
            })
        }

        pub fn with_stale_today(self, id: &str) -> Self {
            let yesterday = self.now - Duration::days(1);
            self.push(id, |t| {
                t.date_marked_as_to_be_done_today = Some(yesterday);
                t.number_of_times_marked_as_to_be_done_today = 1;
            })
        }

        pub fn with_done(self, id: &str) -> Self {
            self.push(id, |t| t.is_done = true)
        }

        pub fn with_deleted(self, id: &str) -> Self {
            let now = self.now;
            self.push(id, |t| t.date_deleted = Some(now))
        }

        pub fn with_todo(self, id: &str, edit: impl FnOnce(&mut Todo)) -> Self {
            self.push(id, edit)
        }

        pub fn ids(&self) -> Vec<String> {
            self.store.get().iter().map(|t| t.id.clone()).collect()
        }

        pub fn find(&self, id: &str) -> Option<&Todo> {
            self.store.get().iter().find(|t| t.id == id)
        }
    }
}
