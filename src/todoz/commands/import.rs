//! Restoring todos from a JSON file.
//!
//! The file must pass the storage schema as a whole. Any invalid record
//! rejects the entire import and leaves the store untouched.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TodozError};
use crate::model::Todo;
use crate::schema;
use crate::store::{PersistStatus, StorageBackend, TodoStore};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// Replace the whole list with the imported one.
    #[default]
    Overwrite,
    /// Append only todos whose id is not already present.
    Merge,
}

/// Appends the todos from `incoming` whose id is new. Existing todos win.
pub fn merge(existing: &[Todo], incoming: Vec<Todo>) -> Vec<Todo> {
    let known: HashSet<&str> = existing.iter().map(|t| t.id.as_str()).collect();
    let fresh: Vec<Todo> = incoming
        .into_iter()
        .filter(|t| !known.contains(t.id.as_str()))
        .collect();
    let mut next = existing.to_vec();
    next.extend(fresh);
    next
}

/// Validates `data` and applies it according to `mode`.
pub fn apply_value<B: StorageBackend>(
    store: &mut TodoStore<B>,
    data: &Value,
    mode: ImportMode,
) -> Result<CmdResult> {
    let incoming = schema::decode_strict(data).map_err(|e| {
        error!(error = %e, "rejecting import");
        TodozError::Validation(e)
    })?;

    let mut result = CmdResult::default();
    let incoming_count = incoming.len();
    let before = store.get().len();
    let next = match mode {
        ImportMode::Overwrite => incoming,
        ImportMode::Merge => merge(store.get(), incoming),
    };

    let message = match mode {
        ImportMode::Overwrite => format!("Imported {} todos, replacing {}", next.len(), before),
        ImportMode::Merge => format!(
            "Merged {} new todos ({} already present)",
            next.len() - before,
            incoming_count - (next.len() - before)
        ),
    };
    if let PersistStatus::NotSaved(reason) = store.set(next) {
        error!(%reason, "imported todos could not be saved");
        return Err(TodozError::Store(format!(
            "Imported todos could not be saved: {}",
            reason
        )));
    }
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

/// Reads, parses and applies an import file.
pub fn run<B: StorageBackend>(
    store: &mut TodoStore<B>,
    path: &Path,
    mode: ImportMode,
) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "could not read import file");
        TodozError::Io(e)
    })?;
    let data: Value = serde_json::from_str(&content).map_err(|e| {
        error!(path = %path.display(), error = %e, "import file is not valid JSON");
        TodozError::Serialization(e)
    })?;
    apply_value(store, &data, mode)
}
