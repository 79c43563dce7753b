use std::process::ExitCode;

use clap::Parser;

use moviepipe_client::cli::{Cli, Command};
use moviepipe_client::commands;
use moviepipe_client::error::ClientResult;
use moviepipe_client::selector::SearchParams;
use moviepipe_core::tracing::{TracingMode, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mode = match &cli.command {
        // The worker runs as a daemon; log structured JSON.
        Command::Worker { .. } => TracingMode::Worker,
        _ => TracingMode::Cli,
    };
    if let Err(e) = init_tracing(mode, cli.debug) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    match cli.command {
        Command::Search {
            transport,
            amount,
            genre,
            range,
        } => {
            let params = SearchParams::new(amount, genre, range);
            commands::search::run(&cli.gateway, transport.into(), params).await
        }
        Command::Probe => commands::probe::run(&cli.gateway).await,
        Command::Worker { socket_path } => commands::worker::run(socket_path).await,
    }
}
