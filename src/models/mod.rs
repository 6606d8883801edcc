//! Data models for the Questrade API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Identifiers, [`IdList`], [`Environment`] and the wire datetime format
//! - [`enums`] - Order states, sides, candle intervals, etc.
//! - [`account`] - Accounts and account activities
//! - [`balance`] - Balances and positions
//! - [`order`] - Orders and executions
//! - [`market_data`] - Quotes, candles, markets and server time
//! - [`symbol`] - Symbol lookup and option chains

pub mod primitives;
pub mod enums;
pub mod account;
pub mod balance;
pub mod order;
pub mod market_data;
pub mod symbol;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use balance::*;
pub use order::*;
pub use market_data::*;
pub use symbol::*;
