//! stock-desk: terminal front-end for the stock and table desk

mod cli;
mod commands;
mod desk;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use desk::Desk;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = utils::logger::init_logger_with_file(&cli.log_level, cli.log_dir.as_deref()) {
        eprintln!("warning: {:#}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut desk = Desk::connect(Desk::config_from(&cli))?;

    match cli.command {
        Command::Shell => shell(&mut desk).await,
        command => commands::dispatch(&mut desk, command).await,
    }
}

/// Read commands line by line until `exit` or end of input
///
/// Arguments are split on whitespace; quoting is not supported.
async fn shell(desk: &mut Desk) -> anyhow::Result<()> {
    tracing::info!("Shell started");
    loop {
        let Some(line) = desk.console().ask("stock> ").await? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first() {
            None => continue,
            Some(&("exit" | "quit")) => break,
            Some(_) => {}
        }

        let parsed = Cli::try_parse_from(std::iter::once("stock-desk").chain(words));
        match parsed {
            Ok(cli) => {
                if let Err(e) = commands::dispatch(desk, cli.command).await {
                    commands::report(&e);
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }
    Ok(())
}
