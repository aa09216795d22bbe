//! Command handlers
//!
//! Each handler prints its result to stdout and returns errors unchanged;
//! [`report`] turns them into the operator-facing message.

pub mod auth;
pub mod orders;
pub mod stock;
pub mod tables;
pub mod waiters;

use crate::cli::Command;
use crate::desk::Desk;
use stock_client::ClientError;

pub async fn dispatch(desk: &mut Desk, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => auth::login(desk, username, password).await,
        Command::Logout => auth::logout(desk).await,
        Command::Whoami => auth::whoami(desk).await,
        Command::Stock { action } => stock::run(desk, action).await,
        Command::Waiters { action } => waiters::run(desk, action).await,
        Command::Tables { action } => tables::run(desk, action).await,
        Command::Orders { action } => orders::run(desk, action).await,
        Command::Shell => anyhow::bail!("Already in the shell"),
    }
}

/// Print a failed command for the operator
pub fn report(error: &anyhow::Error) {
    eprintln!("error: {:#}", error);
    if needs_login(error) {
        eprintln!("hint: the session is missing or expired, run `stock-desk login`");
    }
}

fn needs_login(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ClientError>()
        .is_some_and(ClientError::is_unauthorized)
}
