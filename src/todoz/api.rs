//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every client.
//!
//! The facade:
//! - **Resolves selectors**: display positions and id prefixes become ids,
//!   always against the view of the current filter
//! - **Normalizes text**: titles and descriptions go through [`crate::normalize`]
//!   before they reach a command
//! - **Owns the session state**: the store, the view cache and the current
//!   filter, which is persisted next to the todos under [`STATE_KEY`]
//!
//! It does no printing. Every method returns a [`CmdResult`] for the client to
//! render.
//!
//! `TodozApi<B: StorageBackend>` runs on `FileBackend` in the binary and on
//! `InMemoryBackend` in tests.

use crate::commands::{self, CmdMessage};
use crate::config::TodozConfig;
use crate::error::{Result, TodozError};
use crate::index::{index_todos, resolve_all, TodoSelector};
use crate::model::{FilterType, Todo};
use crate::normalize::{normalize_description, normalize_title};
use crate::store::{StorageBackend, TodoStore};
use crate::views::{FilterSelector, ViewCache};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Backend key holding the UI state (the selected filter).
pub const STATE_KEY: &str = "state";

#[derive(Debug, Serialize, Deserialize)]
struct UiState {
    filter: FilterType,
}

pub struct TodozApi<B: StorageBackend> {
    store: TodoStore<B>,
    views: ViewCache,
    filter: FilterSelector,
    config_dir: PathBuf,
    export_dir: Option<PathBuf>,
}

impl<B: StorageBackend> TodozApi<B> {
    /// Opens the store under the configured key and restores the last filter.
    pub fn new(backend: B, config: TodozConfig, config_dir: impl Into<PathBuf>) -> Self {
        let filter = match backend.read(STATE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<UiState>(&raw) {
                Ok(state) => state.filter,
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable ui state");
                    config.default_filter
                }
            },
            Ok(None) => config.default_filter,
            Err(e) => {
                warn!(error = %e, "could not read ui state");
                config.default_filter
            }
        };

        Self {
            store: TodoStore::load(backend, config.storage_key.as_str()),
            views: ViewCache::new(),
            filter: FilterSelector::new(filter),
            config_dir: config_dir.into(),
            export_dir: config.export_dir,
        }
    }

    pub fn store(&self) -> &TodoStore<B> {
        &self.store
    }

    pub fn filter(&self) -> FilterType {
        self.filter.get()
    }

    /// Selects `filter` and remembers it for the next session.
    pub fn set_filter(&mut self, filter: FilterType) -> Result<()> {
        self.filter.set(filter);
        let state = serde_json::to_string(&UiState { filter }).map_err(TodozError::Serialization)?;
        self.store.backend_mut().write(STATE_KEY, &state)
    }

    pub fn list(&mut self, filter: FilterType) -> CmdResult {
        self.list_at(filter, &Local::now())
    }

    pub fn list_at<Tz: TimeZone>(&mut self, filter: FilterType, now: &DateTime<Tz>) -> CmdResult {
        let views = self
            .views
            .get(self.store.generation(), self.store.get(), now);
        commands::list::run(views, filter)
    }

    pub fn add_todo(&mut self, title: &str, for_today: Option<bool>) -> Result<CmdResult> {
        let title = normalize_title(title);
        if title.is_empty() {
            return Err(TodozError::Api("Title cannot be empty".to_string()));
        }
        let for_today = for_today.unwrap_or(self.filter.get() == FilterType::Today);
        let todo = if for_today {
            Todo::new_for_today(title, Utc::now())
        } else {
            Todo::new(title)
        };
        Ok(commands::add::run(&mut self.store, todo))
    }

    pub fn edit_todo(
        &mut self,
        selector: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<CmdResult> {
        let (ids, mut result) = self.resolve(&[selector])?;
        let Some(id) = ids.first() else {
            return Ok(result);
        };
        let Some(mut todo) = commands::helpers::find(self.store.get(), id).cloned() else {
            return Ok(result);
        };

        if let Some(title) = title {
            let title = normalize_title(title);
            if title.is_empty() {
                return Err(TodozError::Api("Title cannot be empty".to_string()));
            }
            todo.title = title;
        }
        if let Some(description) = description {
            todo.description = normalize_description(description);
        }

        let update = commands::update::run(&mut self.store, todo);
        result.messages.extend(update.messages);
        result.affected_todos = update.affected_todos;
        Ok(result)
    }

    pub fn view_todos<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let (ids, result) = self.resolve(selectors)?;
        let found: Vec<Todo> = ids
            .iter()
            .filter_map(|id| commands::helpers::find(self.store.get(), id).cloned())
            .collect();
        Ok(result.with_listed_todos(index_todos(found)))
    }

    pub fn mark_done<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        self.with_ids(selectors, commands::done::run_mark)
    }

    pub fn unmark_done<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        self.with_ids(selectors, commands::done::run_unmark)
    }

    pub fn delete_todos<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        self.with_ids(selectors, commands::delete::run)
    }

    pub fn move_to_today<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        self.with_ids(selectors, commands::moving::run_to_today)
    }

    pub fn move_to_backlog<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        self.with_ids(selectors, commands::moving::run_to_backlog)
    }

    /// Hard deletes the selected todos, or every deleted todo when none are given.
    pub fn purge_todos<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        if selectors.is_empty() {
            return Ok(commands::purge::run(&mut self.store, &[]));
        }
        let (ids, mut result) = self.resolve(selectors)?;
        if ids.is_empty() {
            return Ok(result);
        }
        let purged = commands::purge::run(&mut self.store, &ids);
        result.messages.extend(purged.messages);
        result.affected_todos = purged.affected_todos;
        Ok(result)
    }

    pub fn clear_done(&mut self) -> CmdResult {
        commands::delete::run_all_done(&mut self.store)
    }

    pub fn import(&mut self, path: &Path, mode: ImportMode) -> Result<CmdResult> {
        commands::import::run(&mut self.store, path, mode)
    }

    /// Exports into `dir`, falling back to the configured export directory and
    /// then to the current directory.
    pub fn export(&self, dir: Option<&Path>) -> Result<CmdResult> {
        let dir = dir
            .or(self.export_dir.as_deref())
            .unwrap_or_else(|| Path::new("."));
        commands::export::run(&self.store, dir, &Local::now())
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    fn with_ids<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        run: impl FnOnce(&mut TodoStore<B>, &[String]) -> CmdResult,
    ) -> Result<CmdResult> {
        let (ids, mut result) = self.resolve(selectors)?;
        if ids.is_empty() {
            return Ok(result);
        }
        let applied = run(&mut self.store, &ids);
        result.messages.extend(applied.messages);
        result.affected_todos = applied.affected_todos;
        Ok(result)
    }

    /// Resolves against the current filter's view. Selectors that match
    /// nothing become info messages on the returned result.
    fn resolve<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<(Vec<String>, CmdResult)> {
        let selectors = parse_selectors(inputs)?;
        let filter = self.filter.get();
        let listed = self.list(filter).listed_todos;
        let (ids, failures) = resolve_all(&selectors, &listed, self.store.get());

        let mut result = CmdResult::default();
        for failure in failures {
            result.add_message(CmdMessage::info(failure.to_string()));
        }
        Ok((ids, result))
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<TodoSelector>> {
    inputs
        .iter()
        .map(|s| TodoSelector::from_str(s.as_ref()).map_err(TodozError::Api))
        .collect()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::import::ImportMode;
pub use crate::commands::{CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryBackend;
    use std::fs;

    fn api() -> TodozApi<InMemoryBackend> {
        TodozApi::new(
            InMemoryBackend::new(),
            TodozConfig::default(),
            std::env::temp_dir().join("todoz-api-tests-unused"),
        )
    }

    fn titles(result: &CmdResult) -> Vec<String> {
        result
            .listed_todos
            .iter()
            .map(|dt| dt.todo.title.clone())
            .collect()
    }

    #[test]
    fn add_normalizes_and_follows_current_filter() {
        let mut api = api();
        api.add_todo("  buy   milk \n", None).unwrap();
        assert_eq!(titles(&api.list(FilterType::Today)), vec!["Buy milk"]);

        api.set_filter(FilterType::Backlog).unwrap();
        api.add_todo("fix bike", None).unwrap();
        assert_eq!(titles(&api.list(FilterType::Backlog)), vec!["Fix bike"]);

        api.add_todo("call mum", Some(true)).unwrap();
        assert_eq!(api.list(FilterType::Today).listed_todos.len(), 2);
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut api = api();
        let err = api.add_todo(" \n\t", None).unwrap_err();
        assert!(matches!(err, TodozError::Api(_)));
        assert!(api.store().get().is_empty());
    }

    #[test]
    fn positions_resolve_against_current_filter() {
        let mut api = api();
        api.set_filter(FilterType::Backlog).unwrap();
        api.add_todo("first", None).unwrap();
        api.add_todo("second", None).unwrap();
        let backlog = titles(&api.list(FilterType::Backlog));

        api.move_to_today(&["1"]).unwrap();

        assert_eq!(titles(&api.list(FilterType::Today)), vec![backlog[0].clone()]);
        assert_eq!(titles(&api.list(FilterType::Backlog)), vec![backlog[1].clone()]);
    }

    #[test]
    fn unknown_selector_is_an_info_message() {
        let mut api = api();
        api.add_todo("only", None).unwrap();
        let generation = api.store().generation();

        let result = api.mark_done(&["7"]).unwrap();

        assert!(result.has_level(MessageLevel::Info));
        assert!(result.affected_todos.is_empty());
        assert_eq!(api.store().generation(), generation);
    }

    #[test]
    fn zero_is_not_a_selector() {
        let mut api = api();
        assert!(matches!(api.mark_done(&["0"]), Err(TodozError::Api(_))));
    }

    #[test]
    fn edit_replaces_text() {
        let mut api = api();
        api.add_todo("draft", None).unwrap();

        api.edit_todo("1", Some("final  version"), Some("line one\nline two"))
            .unwrap();

        let todo = &api.store().get()[0];
        assert_eq!(todo.title, "Final version");
        assert_eq!(todo.description, "line one  \nline two");
    }

    #[test]
    fn lifecycle_through_the_facade() {
        let mut api = api();
        api.add_todo("buy milk", Some(false)).unwrap();
        let id = api.store().get()[0].id.clone();

        api.move_to_today(&[id.as_str()]).unwrap();
        assert_eq!(api.list(FilterType::Today).listed_todos.len(), 1);

        api.mark_done(&[id.as_str()]).unwrap();
        assert_eq!(api.list(FilterType::Done).listed_todos.len(), 1);

        api.clear_done();
        assert!(api.list(FilterType::Done).listed_todos.is_empty());
        assert_eq!(api.list(FilterType::Deleted).listed_todos.len(), 1);

        api.purge_todos::<&str>(&[]).unwrap();
        assert!(api.store().get().is_empty());
    }

    #[test]
    fn id_prefix_selects_deleted_todo() {
        let mut api = api();
        api.add_todo("gone soon", Some(false)).unwrap();
        let id = api.store().get()[0].id.clone();
        api.delete_todos(&[id.as_str()]).unwrap();

        api.move_to_backlog(&[&id[..8]]).unwrap();

        assert_eq!(titles(&api.list(FilterType::Backlog)), vec!["Gone soon"]);
    }

    #[test]
    fn filter_survives_reopening() {
        let mut api = api();
        api.set_filter(FilterType::Done).unwrap();
        let backend = api.store().backend().clone();

        let reopened = TodozApi::new(backend, TodozConfig::default(), PathBuf::new());
        assert_eq!(reopened.filter(), FilterType::Done);
    }

    #[test]
    fn default_filter_comes_from_config() {
        let config = TodozConfig {
            default_filter: FilterType::All,
            ..TodozConfig::default()
        };
        let api = TodozApi::new(InMemoryBackend::new(), config, PathBuf::new());
        assert_eq!(api.filter(), FilterType::All);
    }

    #[test]
    fn export_then_import_restores_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = api();
        source.add_todo("keep me", Some(true)).unwrap();
        let before = source.store().get()[0].clone();

        let exported = source.export(Some(dir.path())).unwrap();
        let path = exported.written_paths[0].clone();
        assert!(fs::metadata(&path).is_ok());

        let mut fresh = api();
        fresh.import(&path, ImportMode::Overwrite).unwrap();
        let restored = &fresh.store().get()[0];
        assert_eq!(restored.id, before.id);
        assert_eq!(restored.title, "Keep me");
        assert_eq!(restored.number_of_times_marked_as_to_be_done_today, 1);
        assert_eq!(fresh.list(FilterType::Today).listed_todos.len(), 1);
    }
}
