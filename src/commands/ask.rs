//! `ted ask`: several suggestions, pick one by number.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use tracing::info;

use super::{CommandKind, MISSING_QUESTION, flush_stdout, read_line, record_or_warn};
use crate::ai::QueryResolver;
use crate::ai::parser::format_ask_response;
use crate::shell::{CommandRunner, run_checked};
use crate::ui::style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Executed { command: String },
    /// The user pressed Enter without choosing.
    Skipped,
}

/// Show suggestions for `question`, read a choice from `input` and run it.
///
/// Once a command has been chosen the interaction is recorded whether or not
/// the command succeeds; a failed command is reported afterwards.
pub async fn run_ask<Q, R, I>(
    question: &str,
    resolver: &Q,
    runner: &R,
    input: &mut I,
    history_path: &Path,
) -> Result<AskOutcome>
where
    Q: QueryResolver,
    R: CommandRunner,
    I: BufRead,
{
    let question = question.trim();
    if question.is_empty() {
        bail!(MISSING_QUESTION);
    }

    println!("{}\n", style::thinking("Thinking..."));
    let response = resolver
        .resolve_ask(question)
        .await
        .context("error generating commands")?;

    for (i, option) in response.commands.iter().enumerate() {
        println!(
            "{}. {} - {}",
            i + 1,
            style::command(format!("`{}`", option.command)),
            option.description
        );
    }

    print!(
        "\nSelect an option (1-{}) or press Enter to exit: ",
        response.commands.len()
    );
    flush_stdout()?;

    let choice = read_line(input)?;
    if choice.is_empty() {
        return Ok(AskOutcome::Skipped);
    }

    let command = match choice.parse::<usize>() {
        Ok(n) if (1..=response.commands.len()).contains(&n) => {
            response.commands[n - 1].command.clone()
        }
        _ => bail!("invalid selection"),
    };
    info!(%command, "Ask option selected");

    println!("{}", style::running(format!("Running `{command}`")));
    let result = run_checked(runner, &command).await;

    record_or_warn(
        history_path,
        CommandKind::Ask,
        question,
        &format_ask_response(&response),
        Some(&command),
    );

    result?;
    Ok(AskOutcome::Executed { command })
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::commands::fakes::{FakeResolver, FakeRunner};
    use crate::history::{Entry, HistoryStore};
    use crate::shell::ShellError;

    const OPTIONS: &[(&str, &str)] = &[
        ("du -sh *", "Size of each item"),
        ("find . -size +100M", "Files over 100MB"),
        ("ls -lS", "Sort by size"),
    ];

    const FORMATTED: &str = "1. `du -sh *` - Size of each item\n\
                             2. `find . -size +100M` - Files over 100MB\n\
                             3. `ls -lS` - Sort by size";

    fn history_path() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");
        (dir, path)
    }

    fn stored(path: &Path) -> Vec<Entry> {
        HistoryStore::open(path).unwrap().entries().unwrap()
    }

    #[tokio::test]
    async fn test_selected_option_runs_and_is_recorded() {
        let (_dir, path) = history_path();
        let resolver = FakeResolver::ask(OPTIONS);
        let runner = FakeRunner::exiting(0);
        let mut input = "2\n".as_bytes();

        let outcome = run_ask("find large files", &resolver, &runner, &mut input, &path)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AskOutcome::Executed {
                command: "find . -size +100M".to_string()
            }
        );
        assert_eq!(runner.ran(), vec!["find . -size +100M"]);

        let entries = stored(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command_kind, "ask");
        assert_eq!(entries[0].query, "find large files");
        assert_eq!(entries[0].response, FORMATTED);
        assert_eq!(entries[0].selected.as_deref(), Some("find . -size +100M"));
    }

    #[tokio::test]
    async fn test_enter_exits_without_running() {
        let (_dir, path) = history_path();
        let resolver = FakeResolver::ask(OPTIONS);
        let runner = FakeRunner::exiting(0);
        let mut input = "\n".as_bytes();

        let outcome = run_ask("find large files", &resolver, &runner, &mut input, &path)
            .await
            .unwrap();

        assert_eq!(outcome, AskOutcome::Skipped);
        assert!(runner.ran().is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_end_of_input_exits_without_running() {
        let (_dir, path) = history_path();
        let resolver = FakeResolver::ask(OPTIONS);
        let runner = FakeRunner::exiting(0);
        let mut input = "".as_bytes();

        let outcome = run_ask("q", &resolver, &runner, &mut input, &path).await.unwrap();

        assert_eq!(outcome, AskOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_invalid_selection_is_error() {
        for choice in ["0\n", "4\n", "two\n"] {
            let (_dir, path) = history_path();
            let resolver = FakeResolver::ask(OPTIONS);
            let runner = FakeRunner::exiting(0);
            let mut input = choice.as_bytes();

            let err = run_ask("q", &resolver, &runner, &mut input, &path)
                .await
                .unwrap_err();

            assert_eq!(err.to_string(), "invalid selection");
            assert!(runner.ran().is_empty());
            assert!(!path.exists());
        }
    }

    #[tokio::test]
    async fn test_failed_command_is_recorded_then_reported() {
        let (_dir, path) = history_path();
        let resolver = FakeResolver::ask(OPTIONS);
        let runner = FakeRunner::exiting(2);
        let mut input = "1\n".as_bytes();

        let err = run_ask("sizes", &resolver, &runner, &mut input, &path)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ShellError>(),
            Some(ShellError::Failed { .. })
        ));
        let entries = stored(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].selected.as_deref(), Some("du -sh *"));
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected() {
        let (_dir, path) = history_path();
        let resolver = FakeResolver::ask(OPTIONS);
        let runner = FakeRunner::exiting(0);
        let mut input = "1\n".as_bytes();

        let err = run_ask("", &resolver, &runner, &mut input, &path)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("please provide a question"));
    }
}
