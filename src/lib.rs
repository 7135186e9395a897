//! ted - turn natural-language requests into shell commands.
//!
//! The crate is organized around a small, persistent history of past
//! interactions:
//! - [`history`]: the bounded, ordered history log stored in SQLite
//! - [`ai`]: resolving queries into commands through an OpenAI-compatible API
//! - [`shell`]: running the chosen command
//! - [`commands`]: the `agent`, `ask`, `history` and `settings` flows
//!
//! # Example
//!
//! ```no_run
//! use ted::history::HistoryStore;
//!
//! let mut store = HistoryStore::open("/tmp/ted/history.db")?;
//! store.add_entry("agent", "list files", "Lists the directory", Some("ls -la"))?;
//! for entry in store.entries()? {
//!     println!("{} {}", entry.id, entry.display_command());
//! }
//! store.close()?;
//! # Ok::<(), ted::history::HistoryError>(())
//! ```

pub mod ai;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod history;
pub mod shell;
pub mod ui;
pub mod utils;

pub use app::App;
pub use history::{Entry, HistoryError, HistoryStore};
