//! Market data models: quotes, candles, markets and server time.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OptionType, OrderSide};
use super::primitives::SymbolId;

/// Level 1 quote for a security.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Internal symbol id
    pub symbol_id: SymbolId,
    /// Market tier
    #[serde(default)]
    pub tier: Option<String>,
    /// Best bid price
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    /// Best bid size
    #[serde(default)]
    pub bid_size: Option<Decimal>,
    /// Best ask price
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    /// Best ask size
    #[serde(default)]
    pub ask_size: Option<Decimal>,
    /// Last trade price during regular trading hours
    #[serde(default)]
    pub last_trade_price_tr_hrs: Option<Decimal>,
    /// Last trade price
    #[serde(default)]
    pub last_trade_price: Option<Decimal>,
    /// Last trade size
    #[serde(default)]
    pub last_trade_size: Option<Decimal>,
    /// Last trade tick ("Up", "Down", "Equal")
    #[serde(default)]
    pub last_trade_tick: Option<String>,
    /// Last trade time
    #[serde(default)]
    pub last_trade_time: Option<DateTime<FixedOffset>>,
    /// Volume
    #[serde(default)]
    pub volume: Option<u64>,
    /// Open price
    #[serde(default)]
    pub open_price: Option<Decimal>,
    /// High price
    #[serde(default)]
    pub high_price: Option<Decimal>,
    /// Low price
    #[serde(default)]
    pub low_price: Option<Decimal>,
    /// Delay in minutes; non-zero for snap quotes past the real-time limit
    #[serde(default)]
    pub delay: u32,
    /// Whether trading is halted
    #[serde(default)]
    pub is_halted: bool,
}

impl Quote {
    /// Returns `true` if the quote is delayed rather than real-time.
    pub fn is_delayed(&self) -> bool {
        self.delay > 0
    }
}

/// Level 1 quote and greeks for an option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuote {
    /// Underlying symbol
    pub underlying: String,
    /// Underlying symbol id
    pub underlying_id: SymbolId,
    /// Option symbol
    pub symbol: String,
    /// Option symbol id
    pub symbol_id: SymbolId,
    /// Best bid price
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    /// Best bid size
    #[serde(default)]
    pub bid_size: Option<Decimal>,
    /// Best ask price
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    /// Best ask size
    #[serde(default)]
    pub ask_size: Option<Decimal>,
    /// Last trade price
    #[serde(default)]
    pub last_trade_price: Option<Decimal>,
    /// Volume
    #[serde(default)]
    pub volume: Option<u64>,
    /// Implied volatility
    #[serde(default)]
    pub volatility: Option<Decimal>,
    /// Delta
    #[serde(default)]
    pub delta: Option<Decimal>,
    /// Gamma
    #[serde(default)]
    pub gamma: Option<Decimal>,
    /// Theta
    #[serde(default)]
    pub theta: Option<Decimal>,
    /// Vega
    #[serde(default)]
    pub vega: Option<Decimal>,
    /// Rho
    #[serde(default)]
    pub rho: Option<Decimal>,
    /// Open interest
    #[serde(default)]
    pub open_interest: Option<u64>,
    /// Delay in minutes
    #[serde(default)]
    pub delay: u32,
    /// Whether trading is halted
    #[serde(default)]
    pub is_halted: bool,
    /// Volume-weighted average price
    #[serde(default, rename = "VWAP")]
    pub vwap: Option<Decimal>,
}

/// Calculated quote for a multi-leg strategy variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyQuote {
    /// Variant id supplied in the request
    pub variant_id: u32,
    /// Bid price
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    /// Ask price
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    /// Underlying symbol
    pub underlying: String,
    /// Underlying symbol id
    pub underlying_id: SymbolId,
    /// Open price
    #[serde(default)]
    pub open_price: Option<Decimal>,
    /// Implied volatility
    #[serde(default)]
    pub volatility: Option<Decimal>,
    /// Delta
    #[serde(default)]
    pub delta: Option<Decimal>,
    /// Gamma
    #[serde(default)]
    pub gamma: Option<Decimal>,
    /// Theta
    #[serde(default)]
    pub theta: Option<Decimal>,
    /// Vega
    #[serde(default)]
    pub vega: Option<Decimal>,
    /// Rho
    #[serde(default)]
    pub rho: Option<Decimal>,
    /// Whether the quote is real-time
    #[serde(default)]
    pub is_real_time: bool,
}

/// Filter selecting options of an underlying for an option quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionFilter {
    /// Call or put
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionType>,
    /// Underlying symbol id
    pub underlying_id: SymbolId,
    /// Expiry date
    pub expiry_date: DateTime<FixedOffset>,
    /// Minimum strike price
    #[serde(rename = "minstrikePrice", skip_serializing_if = "Option::is_none")]
    pub min_strike_price: Option<Decimal>,
    /// Maximum strike price
    #[serde(rename = "maxstrikePrice", skip_serializing_if = "Option::is_none")]
    pub max_strike_price: Option<Decimal>,
}

/// Body of an option quote request: explicit option ids, filters, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuoteRequest {
    /// Filters selecting options by underlying and expiry
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<OptionFilter>,
    /// Explicit option symbol ids
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub option_ids: Vec<SymbolId>,
}

impl OptionQuoteRequest {
    /// Request quotes for explicit option ids.
    pub fn for_ids(ids: impl IntoIterator<Item = SymbolId>) -> Self {
        Self {
            option_ids: ids.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Add a filter.
    pub fn filter(mut self, filter: OptionFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns `true` if the request selects nothing.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.option_ids.is_empty()
    }
}

/// One leg of a strategy variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyLeg {
    /// Symbol id of the leg
    pub symbol_id: SymbolId,
    /// Buy or sell
    pub action: OrderSide,
    /// Leg ratio
    pub ratio: u32,
}

/// A strategy to price, identified by a caller-chosen variant id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyVariant {
    /// Caller-chosen id echoed back in [`StrategyQuote::variant_id`]
    pub variant_id: u32,
    /// Strategy type (e.g. "CoveredCall", "Custom")
    pub strategy: String,
    /// Legs
    pub legs: Vec<StrategyLeg>,
}

/// Historical OHLC candle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Candle start
    pub start: DateTime<FixedOffset>,
    /// Candle end
    pub end: DateTime<FixedOffset>,
    /// Low
    pub low: Decimal,
    /// High
    pub high: Decimal,
    /// Open
    pub open: Decimal,
    /// Close
    pub close: Decimal,
    /// Volume
    #[serde(default)]
    pub volume: u64,
}

/// A market supported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Market name
    pub name: String,
    /// Trading venues
    #[serde(default)]
    pub trading_venues: Vec<String>,
    /// Default trading venue
    #[serde(default)]
    pub default_trading_venue: Option<String>,
    /// Primary order routes
    #[serde(default)]
    pub primary_order_routes: Vec<String>,
    /// Secondary order routes
    #[serde(default)]
    pub secondary_order_routes: Vec<String>,
    /// Level 1 data feeds
    #[serde(default)]
    pub level1_feeds: Vec<String>,
    /// Level 2 data feeds
    #[serde(default)]
    pub level2_feeds: Vec<String>,
    /// Pre-market session start
    #[serde(default)]
    pub extended_start_time: Option<DateTime<FixedOffset>>,
    /// Regular session start
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,
    /// Regular session end
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
    /// After-hours session end
    #[serde(default)]
    pub extended_end_time: Option<DateTime<FixedOffset>>,
    /// Currency
    #[serde(default)]
    pub currency: Option<String>,
    /// Snap quotes allowed per day
    #[serde(default)]
    pub snap_quotes_limit: Option<u64>,
}

/// Current time on the API server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServerTime {
    /// Server time, with the server's offset
    pub time: DateTime<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_decode() {
        let quote: Quote = serde_json::from_value(serde_json::json!({
            "symbol": "THI.TO",
            "symbolId": 38738,
            "tier": "",
            "bidPrice": 83.65,
            "bidSize": 6500,
            "askPrice": 83.67,
            "askSize": 9100,
            "lastTradePriceTrHrs": 83.66,
            "lastTradePrice": 83.66,
            "lastTradeSize": 3100,
            "lastTradeTick": "Equal",
            "lastTradeTime": "2014-10-24T20:06:40.131000-04:00",
            "volume": 80483500,
            "openPrice": 83.66,
            "highPrice": 83.86,
            "lowPrice": 83.66,
            "delay": 0,
            "isHalted": false
        }))
        .unwrap();

        assert_eq!(quote.bid_price, Some(dec!(83.65)));
        assert!(!quote.is_delayed());
    }

    #[test]
    fn test_option_quote_request_serialization() {
        let request = OptionQuoteRequest::for_ids([SymbolId::new(9907637), SymbolId::new(9907638)]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"optionIds": [9907637, 9907638]}));
        assert!(OptionQuoteRequest::default().is_empty());
    }

    #[test]
    fn test_strategy_variant_serialization() {
        let variant = StrategyVariant {
            variant_id: 1,
            strategy: "Custom".to_string(),
            legs: vec![StrategyLeg {
                symbol_id: SymbolId::new(27426),
                action: OrderSide::Buy,
                ratio: 1000,
            }],
        };
        let json = serde_json::to_value(&variant).unwrap();
        assert_eq!(json["variantId"], 1);
        assert_eq!(json["legs"][0]["symbolId"], 27426);
        assert_eq!(json["legs"][0]["action"], "Buy");
    }

    #[test]
    fn test_server_time_keeps_offset() {
        let time: ServerTime =
            serde_json::from_str(r#"{"time":"2014-10-24T12:14:42.730000-04:00"}"#).unwrap();
        assert_eq!(time.time.offset().local_minus_utc(), -4 * 3600);
    }
}
