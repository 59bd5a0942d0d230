mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use token_client::{ClientResult, Config};

use cli::{Action, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(&cli.global.log_level, cli.global.log_json);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    let action = match command.into_action() {
        Ok(action) => action,
        Err(not_runnable) => {
            eprintln!("{not_runnable}");
            return ExitCode::SUCCESS;
        }
    };

    match execute(&cli.global, action).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(global: &cli::GlobalOpts, action: Action) -> ClientResult<()> {
    let mut config = Config::load(global.config.as_deref())?;
    global.apply(&mut config);
    commands::run(action, config).await
}
