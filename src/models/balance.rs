//! Balance and position models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::SymbolId;

/// Balance figures for one currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyBalance {
    /// Currency of the figures ("CAD" or "USD")
    pub currency: String,
    /// Cash
    pub cash: Decimal,
    /// Market value of all securities
    pub market_value: Decimal,
    /// Cash plus market value
    pub total_equity: Decimal,
    /// Buying power
    pub buying_power: Decimal,
    /// Maintenance excess
    pub maintenance_excess: Decimal,
    /// Whether the figures are real-time
    #[serde(default)]
    pub is_real_time: bool,
}

/// Current and start-of-day balances of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalances {
    /// Balances broken down per currency
    pub per_currency_balances: Vec<CurrencyBalance>,
    /// Balances combined into each currency
    pub combined_balances: Vec<CurrencyBalance>,
    /// Start-of-day balances per currency
    #[serde(default)]
    pub sod_per_currency_balances: Vec<CurrencyBalance>,
    /// Start-of-day balances combined into each currency
    #[serde(default)]
    pub sod_combined_balances: Vec<CurrencyBalance>,
}

impl AccountBalances {
    /// Combined balance expressed in `currency`, if reported.
    pub fn combined(&self, currency: &str) -> Option<&CurrencyBalance> {
        self.combined_balances
            .iter()
            .find(|b| b.currency.eq_ignore_ascii_case(currency))
    }
}

/// An open or recently closed position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Symbol
    pub symbol: String,
    /// Internal symbol id
    pub symbol_id: SymbolId,
    /// Open quantity
    pub open_quantity: Decimal,
    /// Quantity closed today
    #[serde(default)]
    pub closed_quantity: Decimal,
    /// Current market value
    #[serde(default)]
    pub current_market_value: Option<Decimal>,
    /// Current price
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Average entry price
    #[serde(default)]
    pub average_entry_price: Option<Decimal>,
    /// Realized P&L for the day
    #[serde(default)]
    pub closed_pnl: Option<Decimal>,
    /// Unrealized P&L
    #[serde(default)]
    pub open_pnl: Option<Decimal>,
    /// Total cost
    #[serde(default)]
    pub total_cost: Option<Decimal>,
    /// Whether the figures are real-time
    #[serde(default)]
    pub is_real_time: bool,
    /// Whether the security is under reorganization
    #[serde(default)]
    pub is_under_reorg: bool,
}
