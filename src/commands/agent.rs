//! `ted agent`: one command, confirmed, then run.

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use tracing::info;

use super::{CommandKind, MISSING_QUERY, record_or_warn};
use crate::ai::QueryResolver;
use crate::shell::{CommandRunner, run_checked};
use crate::ui::confirm::{Confirmation, Decision};
use crate::ui::style;

/// What happened after the command was proposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    Executed { command: String },
    Cancelled,
}

/// Resolve `query` into a single command, ask for confirmation and run it.
///
/// The interaction is recorded only when the command ran and exited
/// successfully.
pub async fn run_agent<Q, C, R>(
    query: &str,
    resolver: &Q,
    confirm: &mut C,
    runner: &R,
    history_path: &Path,
) -> Result<AgentOutcome>
where
    Q: QueryResolver,
    C: Confirmation,
    R: CommandRunner,
{
    let query = query.trim();
    if query.is_empty() {
        bail!(MISSING_QUERY);
    }

    println!("{}", style::thinking("Thinking..."));
    let response = resolver
        .resolve_agent(query)
        .await
        .context("error generating command")?;
    info!(command = %response.command, "Agent proposed command");

    match confirm.prompt(&response.command, &response.explanation)? {
        Decision::Cancelled => {
            println!("Command execution cancelled.");
            return Ok(AgentOutcome::Cancelled);
        }
        Decision::Confirmed => {}
    }

    println!("{}", style::running(format!("Running `{}`", response.command)));
    run_checked(runner, &response.command).await?;

    record_or_warn(
        history_path,
        CommandKind::Agent,
        query,
        &response.explanation,
        Some(&response.command),
    );

    Ok(AgentOutcome::Executed {
        command: response.command,
    })
}
