//! The user-facing subcommands.
//!
//! Each flow takes its collaborators (resolver, confirmation, runner, input)
//! as parameters so tests can drive it without a terminal or network.

pub mod agent;
pub mod ask;
pub mod history;
pub mod settings;

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::history::{Entry, HistoryResult, HistoryStore};
use crate::ui::style;

pub const MISSING_QUERY: &str =
    "please provide a query. Example: ted agent how to make a python3 venv";
pub const MISSING_QUESTION: &str =
    "please provide a question. Example: ted ask how to make a python venv";

/// Which flow produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Agent,
    Ask,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Agent => "agent",
            CommandKind::Ask => "ask",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join the words given on the command line, or `None` when nothing was given.
pub fn join_words(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Open the store, append one entry and close it again.
pub fn record_interaction(
    history_path: &Path,
    kind: CommandKind,
    query: &str,
    response: &str,
    selected: Option<&str>,
) -> HistoryResult<Entry> {
    let mut store = HistoryStore::open(history_path)?;
    let entry = store.add_entry(kind.as_str(), query, response, selected)?;
    store.close()?;
    Ok(entry)
}

/// Record an interaction, downgrading failure to a printed warning.
pub(crate) fn record_or_warn(
    history_path: &Path,
    kind: CommandKind,
    query: &str,
    response: &str,
    selected: Option<&str>,
) {
    match record_interaction(history_path, kind, query, response, selected) {
        Ok(entry) => tracing::debug!(id = entry.id, %kind, "Saved interaction to history"),
        Err(e) => {
            tracing::warn!("Failed to save to history: {}", e);
            println!("{}", style::warning(format!("Warning: Failed to save to history: {e}")));
        }
    }
}

/// Read one line, trimmed. End of input reads as an empty line.
pub(crate) fn read_line<I: BufRead>(input: &mut I) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read input")?;
    Ok(line.trim().to_string())
}

pub(crate) fn flush_stdout() -> Result<()> {
    use std::io::Write;
    std::io::stdout().flush().context("failed to flush stdout")
}

#[cfg(all(test, unix))]
pub(crate) mod fakes;
