use crate::desk::Desk;
use anyhow::Context;
use stock_client::{LoginRequest, SessionState};

pub async fn login(
    desk: &mut Desk,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(u) => u,
        None => ask(desk, "Username: ").await?,
    };
    let password = match password {
        Some(p) => p,
        None => ask(desk, "Password: ").await?,
    };

    desk.api()
        .login(&LoginRequest::new(username, password))
        .await
        .context("Login failed")?;
    println!("Logged in to {}", desk.config().base_url);
    Ok(())
}

async fn ask(desk: &mut Desk, prompt: &str) -> anyhow::Result<String> {
    desk.console()
        .ask(prompt)
        .await?
        .map(|s| s.trim().to_string())
        .context("No input")
}

pub async fn logout(desk: &mut Desk) -> anyhow::Result<()> {
    desk.api().logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(desk: &mut Desk) -> anyhow::Result<()> {
    let session = desk.api().session().read().await;
    let state = match session.state() {
        SessionState::Active => "logged in",
        SessionState::LoggedOut => "logged out",
        SessionState::Expired => "expired, log in again",
    };

    println!("Server:  {}", desk.config().base_url);
    println!("Session: {}", state);
    if let Some(store) = session.store() {
        println!("Token:   {}", store.path().display());
    }
    println!("Join:    {}", desk.config().join_key);
    Ok(())
}
