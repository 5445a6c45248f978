//! # Todoz Architecture
//!
//! Todoz is a **client-side todo state store**: one canonical list of todos,
//! persisted under a single storage key, with five read-only views over it and
//! a closed set of mutations. The command line client is one consumer of the
//! library.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, installs logging       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves selectors (positions, id prefixes) to ids       │
//! │  - Normalizes titles and descriptions                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure transitions: &[Todo] -> Vec<Todo>                   │
//! │  - `run` wrappers that set the store once per operation     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, schema.rs)                          │
//! │  - TodoStore: canonical list, persistence, subscribers      │
//! │  - StorageBackend: FileBackend, InMemoryBackend             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Views ([`views`]) sit beside the command layer. They never mutate and are
//! recomputed whenever the store generation or the calendar day changes.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout or stderr. Diagnostics go
//! through `tracing`; it is up to the client to install a subscriber.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade clients talk to
//! - [`commands`]: Every mutation, plus list, import, export and config
//! - [`store`]: The persistent store and its backends
//! - [`schema`]: Validation and the on-disk encoding
//! - [`views`]: The five filtered and sorted projections
//! - [`model`]: `Todo` and `FilterType`
//! - [`normalize`]: Title and description cleanup
//! - [`index`]: Display positions and selectors
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod store;
pub mod views;
