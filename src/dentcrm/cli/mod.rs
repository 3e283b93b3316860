//! # CLI Behavior
//!
//! The command-line client is a view over the record store: it reads slices, renders them
//! as tables and dispatches mutations. Nothing here is needed to use the library.
//!
//! ## Data directory
//!
//! Resolved in order: `--home <dir>`, `DENTCRM_HOME`, the platform data directory. The
//! store file and `config.json` both live there.
//!
//! ## Naked Execution (`dentcrm`)
//!
//! Running `dentcrm` with no arguments prints `status`.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `-v` turns on debug output for this crate;
//! `RUST_LOG` overrides both.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch, context wiring and per-command handlers
//! - `render`: Tables, details and colored messages
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
