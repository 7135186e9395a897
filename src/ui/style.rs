//! Color palette and text styles shared by every command.

use std::fmt::Display;

use crossterm::style::{Color, StyledContent, Stylize, style};

pub const PRIMARY: Color = Color::Rgb { r: 124, g: 58, b: 237 }; // purple
pub const SECONDARY: Color = Color::Rgb { r: 16, g: 185, b: 129 }; // green
pub const ACCENT: Color = Color::Rgb { r: 245, g: 158, b: 11 }; // amber
pub const ERROR: Color = Color::Rgb { r: 239, g: 68, b: 68 };
pub const MUTED: Color = Color::Rgb { r: 107, g: 114, b: 128 };
pub const CYAN: Color = Color::Cyan;
pub const BRIGHT_GREEN: Color = Color::Green;
pub const LIGHT_GRAY: Color = Color::Rgb { r: 229, g: 231, b: 235 };
pub const LIGHT_PURPLE: Color = Color::Rgb { r: 167, g: 139, b: 250 };

pub fn title<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(PRIMARY).bold()
}

pub fn header<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(SECONDARY).bold()
}

pub fn entry<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(LIGHT_GRAY)
}

pub fn command<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(ACCENT).bold()
}

pub fn query<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(LIGHT_GRAY).italic()
}

pub fn time<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(MUTED).italic()
}

pub fn selected<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(SECONDARY).bold()
}

pub fn prompt<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(PRIMARY).bold()
}

pub fn error<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(ERROR).bold()
}

pub fn success<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(SECONDARY).bold()
}

pub fn warning<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(ACCENT).bold()
}

pub fn info<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(CYAN)
}

pub fn thinking<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(CYAN).bold()
}

pub fn running<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(BRIGHT_GREEN).bold()
}

pub fn full_response<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(LIGHT_PURPLE).bold()
}

pub fn value<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(SECONDARY)
}

/// Re-style every `backticked` span of `text` as a command, keeping the
/// backticks. An unterminated span is left as plain text.
pub fn highlight_commands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('`') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&command(format!("`{}`", &after[..close])).to_string());
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
