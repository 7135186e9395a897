//! Application wiring.
//!
//! `App` owns the resolved locations and settings and hands the real
//! collaborators (AI client, terminal confirmation, shell, stdin) to the
//! command flows.

use std::io;

use anyhow::{Context, Result};
use tracing::info;

use crate::ai::AiClient;
use crate::cli::Command;
use crate::commands::{self, agent, ask, history, settings};
use crate::config::{Settings, TedPaths};
use crate::shell::ShellRunner;
use crate::ui::confirm::TerminalConfirm;
use crate::ui::history_view;

pub struct App {
    paths: TedPaths,
    settings: Settings,
}

impl App {
    /// Load (or create) the settings file under `paths`.
    pub fn new(paths: TedPaths) -> Result<Self> {
        let settings = Settings::load(&paths.config_file).context("error loading config")?;
        Ok(Self { paths, settings })
    }

    pub fn paths(&self) -> &TedPaths {
        &self.paths
    }

    fn ai_client(&self) -> Result<AiClient> {
        let settings = self
            .settings
            .clone()
            .with_env_overrides(|name| std::env::var(name).ok());
        Ok(AiClient::from_settings(&settings)?)
    }

    pub async fn run(self, command: Command) -> Result<()> {
        info!(?command, "Running command");
        match command {
            Command::Agent { query } => {
                let query = commands::join_words(&query).context(commands::MISSING_QUERY)?;
                let client = self.ai_client()?;
                agent::run_agent(
                    &query,
                    &client,
                    &mut TerminalConfirm,
                    &ShellRunner::from_env(),
                    &self.paths.history_file,
                )
                .await?;
            }
            Command::Ask { question } => {
                let question = commands::join_words(&question).context(commands::MISSING_QUESTION)?;
                let client = self.ai_client()?;
                ask::run_ask(
                    &question,
                    &client,
                    &ShellRunner::from_env(),
                    &mut io::stdin().lock(),
                    &self.paths.history_file,
                )
                .await?;
            }
            Command::History => {
                history::run_history(
                    &self.paths.history_file,
                    &mut io::stdin().lock(),
                    history_view::terminal_width(),
                )?;
            }
            Command::Settings => {
                settings::run_settings(&self.paths.config_file, &mut io::stdin().lock())?;
            }
            Command::Version => {
                println!("ted version {}", env!("CARGO_PKG_VERSION"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_default_settings() {
        let dir = tempfile::tempdir().unwrap();
        let paths = TedPaths::new(dir.path());

        let app = App::new(paths.clone()).unwrap();

        assert!(paths.config_file.exists());
        assert_eq!(app.paths(), &paths);
    }

    #[tokio::test]
    async fn test_missing_query_fails_before_needing_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(TedPaths::new(dir.path())).unwrap();

        let err = app.run(Command::Agent { query: vec![] }).await.unwrap_err();

        assert!(err.to_string().contains("please provide a query"));
    }

    #[tokio::test]
    async fn test_version_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(TedPaths::new(dir.path())).unwrap();

        app.run(Command::Version).await.unwrap();
    }
}
