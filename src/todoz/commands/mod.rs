//! # Command Layer
//!
//! Every state transition on the canonical list lives here, one module per
//! concern. Each transition comes in two halves:
//!
//! - a pure function taking the current snapshot and returning the next one
//!   (`done::mark(&todos, id) -> Vec<Todo>`), which is where the field
//!   semantics are defined and tested;
//! - a `run` wrapper that reads the store, applies the transition for each
//!   requested id, writes the result back with a single `set`, and reports
//!   what happened as a [`CmdResult`].
//!
//! Unknown ids are never errors: the list is left as it was and the result
//! carries an info message.

use crate::config::TodozConfig;
use crate::index::DisplayTodo;
use crate::model::Todo;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod done;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod moving;
pub mod purge;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_todos: Vec<Todo>,
    pub listed_todos: Vec<DisplayTodo>,
    pub written_paths: Vec<PathBuf>,
    pub config: Option<TodozConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_todos(mut self, todos: Vec<DisplayTodo>) -> Self {
        self.listed_todos = todos;
        self
    }

    pub fn with_config(mut self, config: TodozConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
