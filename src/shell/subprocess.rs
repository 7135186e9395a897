//! Shell subprocess execution.
//!
//! Commands run through the user's shell with the parent's standard streams,
//! so interactive programs behave as if typed at the prompt.

use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed: {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Runs a command string and reports how it exited.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command: &str) -> Result<ExitStatus, ShellError>;
}

/// Runs commands with `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Use `$SHELL`, falling back to `/bin/sh`.
    pub fn from_env() -> Self {
        let shell = std::env::var("SHELL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "/bin/sh".to_string());
        Self::new(shell)
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<ExitStatus, ShellError> {
        info!(shell = %self.shell, command, "Running command");
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ShellError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !status.success() {
            warn!(command, %status, "Command exited unsuccessfully");
        }
        Ok(status)
    }
}

/// Run `command` and turn a non-zero exit into [`ShellError::Failed`].
pub async fn run_checked<R: CommandRunner>(runner: &R, command: &str) -> Result<(), ShellError> {
    let status = runner.run(command).await?;
    if status.success() {
        Ok(())
    } else {
        Err(ShellError::Failed {
            command: command.to_string(),
            status,
        })
    }
}
