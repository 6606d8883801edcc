//! Symbol lookup and option chain models.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::SecurityType;
use super::primitives::SymbolId;

/// A symbol search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSearchResult {
    /// Symbol
    pub symbol: String,
    /// Internal symbol id
    pub symbol_id: SymbolId,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Security type
    pub security_type: SecurityType,
    /// Listing exchange
    #[serde(default)]
    pub listing_exchange: Option<String>,
    /// Whether quotes are available
    #[serde(default)]
    pub is_quotable: bool,
    /// Whether the symbol can be traded
    #[serde(default)]
    pub is_tradable: bool,
    /// Currency
    #[serde(default)]
    pub currency: Option<String>,
}

/// Detailed information about a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDetail {
    /// Symbol
    pub symbol: String,
    /// Internal symbol id
    pub symbol_id: SymbolId,
    /// Previous day's close
    #[serde(default)]
    pub prev_day_close_price: Option<Decimal>,
    /// 52-week high
    #[serde(default)]
    pub high_price52: Option<Decimal>,
    /// 52-week low
    #[serde(default)]
    pub low_price52: Option<Decimal>,
    /// Average volume over 3 months
    #[serde(default)]
    pub average_vol3_months: Option<u64>,
    /// Average volume over 20 days
    #[serde(default)]
    pub average_vol20_days: Option<u64>,
    /// Outstanding shares
    #[serde(default)]
    pub outstanding_shares: Option<u64>,
    /// Earnings per share
    #[serde(default)]
    pub eps: Option<Decimal>,
    /// Price / earnings
    #[serde(default)]
    pub pe: Option<Decimal>,
    /// Dividend
    #[serde(default)]
    pub dividend: Option<Decimal>,
    /// Dividend yield
    #[serde(default)]
    pub r#yield: Option<Decimal>,
    /// Ex-dividend date
    #[serde(default)]
    pub ex_date: Option<DateTime<FixedOffset>>,
    /// Market capitalization
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    /// Trade unit
    #[serde(default)]
    pub trade_unit: Option<u32>,
    /// Option type, for options
    #[serde(default)]
    pub option_type: Option<String>,
    /// Option duration type, for options
    #[serde(default)]
    pub option_duration_type: Option<String>,
    /// Option root, for options
    #[serde(default)]
    pub option_root: Option<String>,
    /// Option exercise type, for options
    #[serde(default)]
    pub option_exercise_type: Option<String>,
    /// Listing exchange
    #[serde(default)]
    pub listing_exchange: Option<String>,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Security type
    pub security_type: SecurityType,
    /// Option expiry date, for options
    #[serde(default)]
    pub option_expiry_date: Option<DateTime<FixedOffset>>,
    /// Dividend payment date
    #[serde(default)]
    pub dividend_date: Option<DateTime<FixedOffset>>,
    /// Option strike price, for options
    #[serde(default)]
    pub option_strike_price: Option<Decimal>,
    /// Whether the symbol can be traded
    #[serde(default)]
    pub is_tradable: bool,
    /// Whether quotes are available
    #[serde(default)]
    pub is_quotable: bool,
    /// Whether options are listed on this symbol
    #[serde(default)]
    pub has_options: bool,
    /// Currency
    #[serde(default)]
    pub currency: Option<String>,
    /// Industry sector
    #[serde(default)]
    pub industry_sector: Option<String>,
    /// Industry group
    #[serde(default)]
    pub industry_group: Option<String>,
    /// Industry sub-group
    #[serde(default)]
    pub industry_sub_group: Option<String>,
}

/// Call and put ids at one strike.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeEntry {
    /// Strike price
    pub strike_price: Decimal,
    /// Call symbol id
    pub call_symbol_id: SymbolId,
    /// Put symbol id
    pub put_symbol_id: SymbolId,
}

/// Strikes listed under one option root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRoot {
    /// Option root
    #[serde(alias = "root")]
    pub option_root: String,
    /// Contract multiplier
    #[serde(default)]
    pub multiplier: Option<u32>,
    /// Strikes
    pub chain_per_strike_price: Vec<StrikeEntry>,
}

/// All strikes for one expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainExpiry {
    /// Expiry date
    pub expiry_date: DateTime<FixedOffset>,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Listing exchange
    #[serde(default)]
    pub listing_exchange: Option<String>,
    /// Exercise type ("American", "European")
    #[serde(default)]
    pub option_exercise_type: Option<String>,
    /// Roots
    pub chain_per_root: Vec<ChainRoot>,
}

impl ChainExpiry {
    /// Iterate every strike across all roots of this expiry.
    pub fn strikes(&self) -> impl Iterator<Item = &StrikeEntry> {
        self.chain_per_root
            .iter()
            .flat_map(|root| root.chain_per_strike_price.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chain_strikes_flatten_roots() {
        let expiry: ChainExpiry = serde_json::from_value(serde_json::json!({
            "expiryDate": "2015-01-17T00:00:00.000000-05:00",
            "description": "BANK OF MONTREAL",
            "listingExchange": "MX",
            "optionExerciseType": "American",
            "chainPerRoot": [
                {"optionRoot": "BMO", "multiplier": 100, "chainPerStrikePrice": [
                    {"strikePrice": 60, "callSymbolId": 6101993, "putSymbolId": 6102009},
                    {"strikePrice": 62, "callSymbolId": 6101994, "putSymbolId": 6102010}
                ]},
                {"optionRoot": "BMO1", "chainPerStrikePrice": [
                    {"strikePrice": 64, "callSymbolId": 6101995, "putSymbolId": 6102011}
                ]}
            ]
        }))
        .unwrap();

        let strikes: Vec<_> = expiry.strikes().map(|s| s.strike_price).collect();
        assert_eq!(strikes, vec![dec!(60), dec!(62), dec!(64)]);
    }

    #[test]
    fn test_search_result_unknown_security_type() {
        let hit: SymbolSearchResult = serde_json::from_value(serde_json::json!({
            "symbol": "BMO",
            "symbolId": 9292,
            "description": "BANK OF MONTREAL",
            "securityType": "Commodity",
            "listingExchange": "NYSE",
            "isQuotable": true,
            "isTradable": true,
            "currency": "USD"
        }))
        .unwrap();
        assert_eq!(hit.security_type, SecurityType::Unknown);
    }
}
