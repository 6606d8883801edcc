//! Account and account-activity models.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::{AccountNumber, SymbolId};

/// A brokerage account owned by the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account type (e.g. "TFSA", "Margin", "RRSP")
    #[serde(rename = "type")]
    pub account_type: String,
    /// Account number
    pub number: AccountNumber,
    /// Status (e.g. "Active")
    pub status: String,
    /// Whether this is the user's primary account
    #[serde(default)]
    pub is_primary: bool,
    /// Whether this account is the one that gets billed
    #[serde(default)]
    pub is_billing: bool,
    /// Client account type (e.g. "Individual", "Joint")
    #[serde(default)]
    pub client_account_type: Option<String>,
}

impl Account {
    /// Returns `true` if this account's type matches `account_type`,
    /// ignoring ASCII case.
    pub fn is_type(&self, account_type: &str) -> bool {
        self.account_type.eq_ignore_ascii_case(account_type)
    }
}

/// The accounts endpoint payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountList {
    /// Accounts the token is authorized for
    pub accounts: Vec<Account>,
    /// Id of the user the token belongs to
    pub user_id: u64,
}

impl AccountList {
    /// Find the first account of the given type, ignoring ASCII case.
    pub fn find_by_type(&self, account_type: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.is_type(account_type))
    }
}

/// A cash movement, trade settlement, dividend or other account activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Trade date
    pub trade_date: DateTime<FixedOffset>,
    /// Transaction date
    pub transaction_date: DateTime<FixedOffset>,
    /// Settlement date
    pub settlement_date: DateTime<FixedOffset>,
    /// Activity action (e.g. "Buy", "Sell", "Deposit")
    #[serde(default)]
    pub action: String,
    /// Symbol, empty for cash activities
    #[serde(default)]
    pub symbol: String,
    /// Internal symbol id, 0 for cash activities
    #[serde(default)]
    pub symbol_id: u64,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Currency
    pub currency: String,
    /// Quantity
    #[serde(default)]
    pub quantity: Decimal,
    /// Price
    #[serde(default)]
    pub price: Decimal,
    /// Gross amount
    #[serde(default)]
    pub gross_amount: Decimal,
    /// Commission
    #[serde(default)]
    pub commission: Decimal,
    /// Net amount
    #[serde(default)]
    pub net_amount: Decimal,
    /// Activity type (e.g. "Trades", "Dividends", "Deposits")
    #[serde(rename = "type")]
    pub activity_type: String,
}

impl Activity {
    /// The symbol id, if this activity concerns a security.
    pub fn symbol_id(&self) -> Option<SymbolId> {
        (self.symbol_id != 0).then(|| SymbolId::new(self.symbol_id))
    }
}
