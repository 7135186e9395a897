//! Terminal presentation for the line-oriented commands.
//!
//! Nothing here takes over the screen: output is plain styled text and the
//! only raw-mode interaction is the single-key confirmation prompt.

pub mod confirm;
pub mod history_view;
pub mod style;
