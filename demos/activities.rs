//! Stream the last 90 days of account activities, one 30-day window at a time.
//!
//! Uses QUESTRADE_ACCOUNT when set, otherwise the first account on the login.
//!
//! Run with: cargo run --example activities

use chrono::{Duration, Local};
use futures_util::StreamExt;
use questrade_rs::{AccountNumber, DateRange, Environment, QuestradeClient, TokenFile};

#[tokio::main]
async fn main() -> questrade_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let token_file = std::env::var("QUESTRADE_TOKEN_FILE")
        .map(TokenFile::new)
        .unwrap_or_default();
    let client = QuestradeClient::new(token_file, Environment::Production)?;
    client.connect().await?;

    let account = match std::env::var("QUESTRADE_ACCOUNT") {
        Ok(number) => AccountNumber::new(number),
        Err(_) => {
            let accounts = client.accounts().list().await?;
            accounts
                .accounts
                .first()
                .map(|a| a.number.clone())
                .expect("no accounts on this login")
        }
    };

    let range = DateRange::since((Local::now() - Duration::days(90)).fixed_offset())?;
    println!("=== Activities for {} ===", account);
    for window in range.windows() {
        println!("window {} .. {}", window.start, window.end);
    }
    println!();

    let mut activities = client.accounts().activities(&account, range);
    let mut count = 0;
    while let Some(activity) = activities.next().await {
        let activity = activity?;
        count += 1;
        println!(
            "{}  {:<12} {:<8} {:>12} {}",
            activity.trade_date.date_naive(),
            activity.action,
            activity.symbol,
            activity.net_amount,
            activity.currency
        );
    }
    println!("\n{} activities", count);

    Ok(())
}
