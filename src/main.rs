//! Entry point for the `ted` binary.

use std::process::ExitCode;

use clap::Parser;

use ted::App;
use ted::cli::Cli;
use ted::config::TedPaths;
use ted::ui::style;
use ted::utils;

async fn run(cli: Cli, paths: TedPaths) -> anyhow::Result<()> {
    App::new(paths)?.run(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = match TedPaths::discover() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("{} {}", style::error("Error:"), e);
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = utils::logger::init_logging(&paths.log_dir);

    match run(cli, paths).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{} {:#}", style::error("Error:"), e);
            ExitCode::FAILURE
        }
    }
}
