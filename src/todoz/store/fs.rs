use super::StorageBackend;
use crate::error::{Result, TodozError};
use std::fs;
use std::path::PathBuf;

/// File-based storage: the value for `key` lives in `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TodozError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(TodozError::Io)?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        fs::write(self.path_for(key), value).map_err(TodozError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Todo;
    use crate::store::{TodoStore, DEFAULT_STORAGE_KEY};

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.read("todos").unwrap(), None);
    }

    #[test]
    fn write_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let mut backend = FileBackend::new(&root);

        backend.write("todos", "[]").unwrap();
        assert_eq!(fs::read_to_string(root.join("todos.json")).unwrap(), "[]");
        assert_eq!(backend.read("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn store_round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TodoStore::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY);
        let todo = Todo::new("Water plants".into());
        assert!(store.set(vec![todo.clone()]).is_saved());

        let reloaded = TodoStore::load(FileBackend::new(dir.path()), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.get().len(), 1);
        assert_eq!(reloaded.get()[0].title, "Water plants");
        assert_eq!(reloaded.raw(), store.raw());
    }

    #[test]
    fn unwritable_root_reports_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        // The root is a regular file, so creating the data directory fails.
        let mut store = TodoStore::load(FileBackend::new(&blocker), DEFAULT_STORAGE_KEY);
        let status = store.set(vec![Todo::new("A".into())]);
        assert!(!status.is_saved());
        assert_eq!(store.get().len(), 1);
    }
}
