//! Single-key confirmation before running a generated command.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use super::style;
use crate::utils::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// Asks the user whether a command should run.
pub trait Confirmation {
    fn prompt(&mut self, command: &str, explanation: &str) -> Result<Decision>;
}

/// Map a key press to a decision. Keys without a meaning return `None`.
pub fn decision_for_key(key: &KeyEvent) -> Option<Decision> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Decision::Cancelled)
        }
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Decision::Confirmed),
        KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => Some(Decision::Cancelled),
        _ => None,
    }
}

/// Reads the answer straight from the terminal in raw mode.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirmation for TerminalConfirm {
    fn prompt(&mut self, command: &str, explanation: &str) -> Result<Decision> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", explanation)?;
        writeln!(stdout, "Command: {}", style::command(command))?;
        write!(stdout, "{}", style::prompt("Execute this command? (y/N): "))?;
        stdout.flush()?;

        let decision = {
            terminal::enable_raw_mode()?;
            let _raw = Context::with(|| {
                if let Err(e) = terminal::disable_raw_mode() {
                    tracing::error!("Failed to disable raw mode: {}", e);
                }
            });
            read_decision()?
        };

        match decision {
            Decision::Confirmed => writeln!(stdout)?,
            Decision::Cancelled => writeln!(stdout, "\nCancelled.")?,
        }
        Ok(decision)
    }
}

fn read_decision() -> Result<Decision> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(decision) = decision_for_key(&key) {
                return Ok(decision);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_keys() {
        for code in [KeyCode::Char('y'), KeyCode::Char('Y'), KeyCode::Enter] {
            assert_eq!(decision_for_key(&press(code)), Some(Decision::Confirmed));
        }
    }

    #[test]
    fn test_cancel_keys() {
        for code in [KeyCode::Char('n'), KeyCode::Char('N'), KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(decision_for_key(&press(code)), Some(Decision::Cancelled));
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(decision_for_key(&ctrl_c), Some(Decision::Cancelled));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        assert_eq!(decision_for_key(&press(KeyCode::Char('c'))), None);
        assert_eq!(decision_for_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(decision_for_key(&press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = press(KeyCode::Char('y'));
        key.kind = KeyEventKind::Release;
        assert_eq!(decision_for_key(&key), None);
    }
}
