//! # CLI Layer
//!
//! One client of the todoz library, and the only place that knows about the
//! terminal: argument parsing, logging setup, colored output and exit codes.
//!
//! - `setup`: clap definitions and the grouped help screen
//! - `commands`: context setup and one `handle_*` per command
//! - `render`: turns `CmdResult`s into terminal lines

mod commands;
mod render;
mod setup;

pub use commands::run;
