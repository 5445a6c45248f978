//! # Storage Layer
//!
//! [`TodoStore`] owns the canonical list of todos and keeps it persisted through
//! a [`StorageBackend`].
//!
//! ## Backends
//!
//! A backend is a string-keyed string storage, the same shape as a browser's
//! local storage:
//!
//! - [`fs::FileBackend`]: production, one `<key>.json` file per key
//! - [`memory::InMemoryBackend`]: tests, with injectable write failures
//!
//! ## Write Path
//!
//! Every [`TodoStore::set`] replaces the whole list, re-encodes it and writes
//! the full value under one key. There are no partial writes. If encoding or
//! writing fails the in-memory list still wins: the failure is logged, the
//! previously stored value is left alone, and the next `set` tries again.
//!
//! ## Read Path
//!
//! [`TodoStore::load`] never fails. Missing data is an empty list, records that
//! fail validation are dropped one by one, and a value that is not a JSON array
//! at all is logged and treated as empty.

use crate::error::Result;
use crate::model::Todo;
use crate::schema;
use tracing::{debug, error, warn};

pub mod fs;
pub mod memory;

pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Abstract string-keyed storage.
pub trait StorageBackend {
    /// Read the value stored under `key`, `None` if nothing was ever stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Outcome of persisting after a [`TodoStore::set`]. Informational only: the
/// in-memory list has been replaced either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    Saved,
    NotSaved(String),
}

impl PersistStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistStatus::Saved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[Todo])>;

pub struct TodoStore<B: StorageBackend> {
    backend: B,
    key: String,
    todos: Vec<Todo>,
    raw: Option<String>,
    generation: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<B: StorageBackend> TodoStore<B> {
    /// Load the list stored under `key`, dropping whatever does not validate.
    pub fn load(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let raw = match backend.read(&key) {
            Ok(raw) => raw,
            Err(e) => {
                error!(key = %key, error = %e, "could not read stored todos, starting empty");
                None
            }
        };

        let todos = match raw.as_deref() {
            None => Vec::new(),
            Some(text) => match schema::decode_stored(text) {
                Ok(batch) => {
                    for (index, reason) in &batch.invalid {
                        warn!(key = %key, index, %reason, "dropping invalid stored todo");
                    }
                    batch.valid
                }
                Err(e) => {
                    error!(key = %key, error = %e, "stored todos are unreadable, starting empty");
                    Vec::new()
                }
            },
        };

        debug!(key = %key, count = todos.len(), "loaded todos");
        Self {
            backend,
            key,
            todos,
            raw,
            generation: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The canonical list.
    pub fn get(&self) -> &[Todo] {
        &self.todos
    }

    /// Replace the canonical list, persist it and notify subscribers.
    pub fn set(&mut self, todos: Vec<Todo>) -> PersistStatus {
        self.todos = todos;
        self.generation += 1;
        let status = self.persist();
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.todos);
        }
        status
    }

    /// Register a callback invoked synchronously after every [`set`](Self::set).
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Todo]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Bumped on every `set`; views compare it to know when to recompute.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The exact value currently in storage, as last read or written.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn persist(&mut self) -> PersistStatus {
        let encoded = match schema::encode(&self.todos) {
            Ok(encoded) => encoded,
            Err(e) => {
                // Keep whatever is stored rather than writing something lossy.
                error!(key = %self.key, error = %e, "refusing to persist todos that fail validation");
                return PersistStatus::NotSaved(e.to_string());
            }
        };

        match self.backend.write(&self.key, &encoded) {
            Ok(()) => {
                debug!(key = %self.key, count = self.todos.len(), bytes = encoded.len(), "persisted todos");
                self.raw = Some(encoded);
                PersistStatus::Saved
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to persist todos, keeping them in memory");
                PersistStatus::NotSaved(e.to_string())
            }
        }
    }
}
