//! Command-line interface definition.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ted", version)]
#[command(about = "AI-powered command line assistant")]
#[command(long_about = "Ted is the fastest way to get answers in the terminal.

Examples:
  ted agent how to make a python virtual environment
  ted ask how to find large files
  ted history
  ted settings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a single command from natural language and optionally run it
    Agent {
        /// What you want to do, in plain words
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Get several command suggestions for a question
    Ask {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },

    /// View and manage recent interactions
    History,

    /// Configure the API key, model and temperature
    Settings,

    /// Show version information
    Version,
}
