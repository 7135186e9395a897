//! `ted history`: list recent interactions and act on one line of input.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::{flush_stdout, read_line};
use crate::history::{HistoryError, HistoryStore};
use crate::ui::history_view::{self, HistoryAction};
use crate::ui::style;

/// Show the history stored at `history_path` and apply the action read from
/// `input`. Only failing to open or read the store is an error.
pub fn run_history<I: BufRead>(
    history_path: &Path,
    input: &mut I,
    width: usize,
) -> Result<HistoryAction> {
    let mut store = HistoryStore::open(history_path).context("error loading history")?;
    let action = browse(&mut store, input, width);
    let closed = store.close();

    let action = action?;
    closed.context("error closing history")?;
    Ok(action)
}

fn browse<I: BufRead>(
    store: &mut HistoryStore,
    input: &mut I,
    width: usize,
) -> Result<HistoryAction> {
    let entries = store.entries().context("error retrieving history entries")?;

    if entries.is_empty() {
        print!("{}", history_view::render_empty());
        return Ok(HistoryAction::Exit);
    }

    print!("{}", history_view::render_listing(&entries));
    print!("\n{} ", style::prompt("Choose an action:"));
    flush_stdout()?;

    let action = history_view::parse_action(&read_line(input)?, entries.len());
    match &action {
        HistoryAction::Exit => println!("{}", style::success("Exited")),
        HistoryAction::DeleteMostRecent => match store.delete_most_recent() {
            Ok(id) => {
                tracing::info!(id, "Deleted most recent history entry");
                println!("{}", style::success("Most recent entry deleted successfully!"));
            }
            Err(HistoryError::NotFound) => println!("{}", style::error("No entries to delete.")),
            Err(e) => println!("{}", style::error(format!("Error deleting entry: {e}"))),
        },
        HistoryAction::Clear => match store.clear() {
            Ok(()) => println!("{}", style::success("All history cleared successfully!")),
            Err(e) => println!("{}", style::error(format!("Error clearing history: {e}"))),
        },
        HistoryAction::View(index) => {
            if let Some(entry) = entries.get(*index) {
                print!("{}", history_view::render_detail(index + 1, entry, width));
            }
        }
        HistoryAction::Invalid => println!(
            "{}",
            style::error(format!(
                "Invalid selection. Please enter a number between 1 and {}.",
                entries.len()
            ))
        ),
    }
    Ok(action)
}
