//! Enumeration types for the Questrade API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which orders to return from the orders endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStateFilter {
    /// Orders that are still working
    Open,
    /// Orders that are done (filled, canceled, expired, ...)
    Closed,
    /// Both open and closed orders
    #[default]
    All,
}

impl OrderStateFilter {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStateFilter::Open => "Open",
            OrderStateFilter::Closed => "Closed",
            OrderStateFilter::All => "All",
        }
    }
}

impl fmt::Display for OrderStateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStateFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" | "opened" => Ok(OrderStateFilter::Open),
            "closed" => Ok(OrderStateFilter::Closed),
            "all" => Ok(OrderStateFilter::All),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown order state filter: {}",
                other
            ))),
        }
    }
}

/// Granularity of historical candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CandleInterval {
    OneMinute,
    TwoMinutes,
    ThreeMinutes,
    FourMinutes,
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    TwentyMinutes,
    HalfHour,
    OneHour,
    TwoHours,
    FourHours,
    OneDay,
    OneWeek,
    OneMonth,
    OneYear,
}

impl CandleInterval {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CandleInterval::OneMinute => "OneMinute",
            CandleInterval::TwoMinutes => "TwoMinutes",
            CandleInterval::ThreeMinutes => "ThreeMinutes",
            CandleInterval::FourMinutes => "FourMinutes",
            CandleInterval::FiveMinutes => "FiveMinutes",
            CandleInterval::TenMinutes => "TenMinutes",
            CandleInterval::FifteenMinutes => "FifteenMinutes",
            CandleInterval::TwentyMinutes => "TwentyMinutes",
            CandleInterval::HalfHour => "HalfHour",
            CandleInterval::OneHour => "OneHour",
            CandleInterval::TwoHours => "TwoHours",
            CandleInterval::FourHours => "FourHours",
            CandleInterval::OneDay => "OneDay",
            CandleInterval::OneWeek => "OneWeek",
            CandleInterval::OneMonth => "OneMonth",
            CandleInterval::OneYear => "OneYear",
        }
    }
}

impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of an order or execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy
    Buy,
    /// Sell
    Sell,
    /// Sell short
    Short,
    /// Cover a short
    Cov,
    /// Buy to open
    #[serde(rename = "BTO")]
    BuyToOpen,
    /// Sell to close
    #[serde(rename = "STC")]
    SellToClose,
    /// Sell to open
    #[serde(rename = "STO")]
    SellToOpen,
    /// Buy to close
    #[serde(rename = "BTC")]
    BuyToClose,
    /// Unknown side
    #[serde(other)]
    Unknown,
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum OrderState {
    Failed,
    Pending,
    Accepted,
    Rejected,
    CancelPending,
    Canceled,
    PartialCanceled,
    Partial,
    Executed,
    ReplacePending,
    Replaced,
    Stopped,
    Suspended,
    Expired,
    Queued,
    Triggered,
    Activated,
    PendingRiskReview,
    ContingentOrder,
    #[serde(other)]
    Unknown,
}

impl OrderState {
    /// Returns `true` if the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Failed
                | OrderState::Rejected
                | OrderState::Canceled
                | OrderState::PartialCanceled
                | OrderState::Executed
                | OrderState::Replaced
                | OrderState::Expired
        )
    }
}

/// Kind of security a symbol refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SecurityType {
    Stock,
    Option,
    Bond,
    Right,
    Gold,
    MutualFund,
    Index,
    #[serde(other)]
    Unknown,
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}
