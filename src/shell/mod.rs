//! Shell execution module.
//!
//! This module runs the commands the user picked in a subprocess that shares
//! the terminal with ted.

mod subprocess;
pub use subprocess::{run_checked, CommandRunner, ShellError, ShellRunner};
