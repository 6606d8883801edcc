//! Connect with a manual refresh token and print the server time and accounts.
//!
//! Save a refresh token from the Questrade App Hub to `refreshToken` (or point
//! QUESTRADE_TOKEN_FILE at another file), then:
//!
//! Run with: cargo run --example connect

use questrade_rs::{Environment, QuestradeClient, TokenFile};

#[tokio::main]
async fn main() -> questrade_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let token_file = std::env::var("QUESTRADE_TOKEN_FILE")
        .map(TokenFile::new)
        .unwrap_or_default();
    let env = match std::env::var("QUESTRADE_ENV").as_deref() {
        Ok("sandbox") => Environment::Sandbox,
        _ => Environment::Production,
    };

    println!("Connecting to {:?}...", env);
    let client = QuestradeClient::new(token_file, env)?;
    client.connect().await?;
    println!("Connected. Refresh token rotated and saved.");
    println!("API server:   {:?}", client.session().api_server().await);
    println!("Expires at:   {:?}", client.session().expires_at().await);

    let time = client.time().server_time().await?;
    println!("Server time:  {}\n", time);

    let accounts = client.accounts().list().await?;
    println!("Found {} accounts", accounts.accounts.len());
    for account in &accounts.accounts {
        println!(
            "  {} {} ({}){}",
            account.number,
            account.account_type,
            account.status,
            if account.is_primary { " primary" } else { "" }
        );
    }

    Ok(())
}
