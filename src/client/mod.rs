//! HTTP client and service layer for the Questrade API.
//!
//! This module provides the main entry point [`QuestradeClient`] for
//! interacting with the Questrade API.
//!
//! # Example
//!
//! ```no_run
//! use questrade_rs::{Environment, QuestradeClient, TokenFile};
//!
//! # async fn example() -> questrade_rs::Result<()> {
//! let client = QuestradeClient::new(TokenFile::new("refreshToken"), Environment::Sandbox)?;
//! client.connect().await?;
//!
//! // Get accounts
//! let accounts = client.accounts().list().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;

pub use config::{ClientConfig, Verbosity};
pub use http::QuestradeClient;
pub use paginated::{DateRange, DateWindow, RangeStream, MAX_WINDOW_DAYS};
pub(crate) use http::ClientInner;
