//! # questrade-rs
//!
//! An async Rust client for the Questrade brokerage REST API.
//!
//! ## Features
//!
//! - **Authentication**: single-use refresh tokens, rotated and written back
//!   to a token file after every exchange
//! - **Automatic refresh**: access tokens are renewed shortly before they
//!   expire, and once more if the server rejects one
//! - **Accounts**: balances, positions, activities, orders and executions
//! - **Market Data**: quotes, option and strategy quotes, candles, option chains
//! - **Date ranges**: long ranges are split into windows the API accepts
//!   and streamed back in order
//! - **Type Safety**: Strongly-typed models with compile-time guarantees
//!
//! ## Quick Start
//!
//! Generate a manual refresh token in the Questrade App Hub and save it to a
//! file named `refreshToken`. The client replaces the file's contents with
//! each newly issued token.
//!
//! ```rust,no_run
//! use questrade_rs::{Environment, QuestradeClient, TokenFile};
//!
//! #[tokio::main]
//! async fn main() -> questrade_rs::Result<()> {
//!     let client = QuestradeClient::new(TokenFile::new("refreshToken"), Environment::Production)?;
//!     client.connect().await?;
//!
//!     let accounts = client.accounts().list().await?;
//!     println!("Found {} accounts", accounts.accounts.len());
//!
//!     if let Some(account) = accounts.find_by_type("Margin") {
//!         let balances = client.accounts().balances(&account.number).await?;
//!         if let Some(cad) = balances.combined("CAD") {
//!             println!("Total equity: {}", cad.total_equity);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Date Ranges
//!
//! ```rust,no_run
//! use chrono::{FixedOffset, TimeZone};
//! use futures_util::StreamExt;
//! use questrade_rs::{CandleInterval, DateRange, QuestradeClient, SymbolId};
//!
//! # async fn example(client: QuestradeClient) -> questrade_rs::Result<()> {
//! let est = FixedOffset::west_opt(5 * 3600).unwrap();
//! let range = DateRange::new(
//!     est.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
//!     Some(est.with_ymd_and_hms(2022, 6, 30, 0, 0, 0).unwrap()),
//! )?;
//!
//! let mut candles = client
//!     .markets()
//!     .candles(SymbolId::new(8049), CandleInterval::OneDay, range);
//! while let Some(candle) = candles.next().await {
//!     let candle = candle?;
//!     println!("{} close={}", candle.start, candle.close);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{Session, TokenFile};
pub use client::{ClientConfig, DateRange, DateWindow, QuestradeClient, RangeStream, Verbosity};
pub use error::{AuthFailure, Error, Result};
pub use models::{
    AccountNumber, CandleInterval, Environment, IdList, OrderId, OrderStateFilter, SymbolId,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use questrade_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{Session, TokenFile};
    pub use crate::client::{ClientConfig, DateRange, QuestradeClient, RangeStream, Verbosity};
    pub use crate::error::{AuthFailure, Error, Result};
    pub use crate::models::{
        // Primitives
        AccountNumber, Environment, IdList, OrderId, SymbolId,
        // Enums
        CandleInterval, OrderSide, OrderState, OrderStateFilter, SecurityType,
        // Account models
        Account, AccountBalances, AccountList, Activity, Position,
        // Order models
        Execution, Order,
        // Market data models
        Candle, OptionQuote, OptionQuoteRequest, Quote, StrategyQuote, StrategyVariant,
        // Symbol models
        ChainExpiry, SymbolDetail, SymbolSearchResult,
    };
}
