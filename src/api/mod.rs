//! API service modules for Questrade endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the Questrade API. Services are cheap handles obtained from
//! [`QuestradeClient`](crate::QuestradeClient) and share its session.

mod accounts;
mod market_data;
mod symbols;
mod time;

pub use accounts::AccountsService;
pub use market_data::MarketsService;
pub use symbols::SymbolsService;
pub use time::TimeService;
