//! Rendering for the `history` command.

use chrono::Local;

use super::style;
use crate::history::Entry;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DEFAULT_WIDTH: usize = 80;

/// What the user asked for after seeing the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    Exit,
    DeleteMostRecent,
    Clear,
    /// Zero-based index into the listing.
    View(usize),
    Invalid,
}

/// Interpret the action line typed under a listing of `count` entries.
pub fn parse_action(input: &str, count: usize) -> HistoryAction {
    match input.trim() {
        "" => HistoryAction::Exit,
        "delete" => HistoryAction::DeleteMostRecent,
        "clear" => HistoryAction::Clear,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => HistoryAction::View(n - 1),
            _ => HistoryAction::Invalid,
        },
    }
}

pub fn render_empty() -> String {
    format!(
        "{}\n{}\n{}\n",
        style::title("Ted Command History"),
        style::error("No command history found."),
        style::query(
            "Try running 'ted ask [question]' or 'ted agent [query]' first to build up some \
             history."
        )
    )
}

fn push_line(out: &mut String, line: impl std::fmt::Display) {
    out.push_str(&line.to_string());
    out.push('\n');
}

fn render_entry(out: &mut String, number: usize, entry: &Entry) {
    let timestamp = entry.timestamp.with_timezone(&Local).format(TIME_FORMAT);
    push_line(out, style::entry(format!("{number}.")));
    push_line(out, style::command(format!("[{}]", entry.command_kind)));
    push_line(out, style::query(&entry.query));
    push_line(out, style::time(timestamp));
    push_line(out, style::selected(format!("`{}`", entry.display_command())));
}

/// The numbered listing followed by the actions menu.
pub fn render_listing(entries: &[Entry]) -> String {
    let mut out = String::new();
    push_line(&mut out, style::title("Ted Command History"));
    push_line(&mut out, style::header(format!("Total: {} entries", entries.len())));

    for (i, entry) in entries.iter().enumerate() {
        render_entry(&mut out, i + 1, entry);
        out.push('\n');
    }

    push_line(&mut out, format!("\n{}", style::prompt("Actions:")));
    push_line(&mut out, format!("• Enter a number (1-{}) to view details", entries.len()));
    push_line(&mut out, "• Type 'delete' to delete most recent entry");
    push_line(&mut out, "• Type 'clear' to delete all history");
    push_line(&mut out, "• Press Enter to exit");
    out
}

/// Detail view of one entry, including the full response when it says more
/// than the selected command.
pub fn render_detail(number: usize, entry: &Entry, width: usize) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("\n{}", style::title(format!("Entry {number} Details"))));
    render_entry(&mut out, number, entry);

    if entry.has_extra_response() {
        push_line(&mut out, format!("\n{}:", style::full_response("Full Response")));
        push_line(&mut out, style::entry(highlighted_response(&entry.response, width)));
    }
    out
}

/// Older records stored newlines as a literal `\n`; expand them, wrap to
/// `width` and highlight backticked commands.
fn highlighted_response(response: &str, width: usize) -> String {
    let cleaned = response.replace("\\n", "\n");
    let wrapped = textwrap::fill(cleaned.trim(), width.max(20));
    style::highlight_commands(&wrapped)
}

/// Current terminal width, or a sane default when not attached to one.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .unwrap_or(DEFAULT_WIDTH)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(selected: Option<&str>, response: &str) -> Entry {
        Entry {
            id: 1,
            timestamp: Utc::now(),
            command_kind: "ask".to_string(),
            query: "how to find large files".to_string(),
            response: response.to_string(),
            selected: selected.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("", 3), HistoryAction::Exit);
        assert_eq!(parse_action("  \n", 3), HistoryAction::Exit);
        assert_eq!(parse_action("delete", 3), HistoryAction::DeleteMostRecent);
        assert_eq!(parse_action("clear\n", 3), HistoryAction::Clear);
        assert_eq!(parse_action("1", 3), HistoryAction::View(0));
        assert_eq!(parse_action("3", 3), HistoryAction::View(2));
        assert_eq!(parse_action("4", 3), HistoryAction::Invalid);
        assert_eq!(parse_action("0", 3), HistoryAction::Invalid);
        assert_eq!(parse_action("remove", 3), HistoryAction::Invalid);
    }

    #[test]
    fn test_listing_shows_selection_or_response() {
        let entries = vec![
            entry(Some("du -sh *"), "1. `du -sh *` - sizes"),
            entry(None, "plain response"),
        ];

        let out = render_listing(&entries);

        assert!(out.contains("Total: 2 entries"));
        assert!(out.contains("`du -sh *`"));
        assert!(out.contains("`plain response`"));
        assert!(out.contains("[ask]"));
        assert!(out.contains("(1-2)"));
    }

    #[test]
    fn test_detail_includes_full_response_only_when_different() {
        let response = "1. `du -sh *` - sizes\\n2. `ls -lS` - sort";
        let with_extra = render_detail(1, &entry(Some("du -sh *"), response), 80);
        assert!(with_extra.contains("Full Response"));
        assert!(with_extra.contains("Entry 1 Details"));
        assert!(with_extra.contains("sort"));
        assert!(!with_extra.contains("\\n"));

        let same = render_detail(2, &entry(Some("ls"), "ls"), 80);
        assert!(!same.contains("Full Response"));

        let none = render_detail(3, &entry(None, "explanation"), 80);
        assert!(!none.contains("Full Response"));
    }

    #[test]
    fn test_empty_message() {
        assert!(render_empty().contains("No command history found."));
    }
}
