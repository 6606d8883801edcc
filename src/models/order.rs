//! Order and execution models.
//!
//! These are read-only views; the client never places or modifies orders.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderSide, OrderState};
use super::primitives::{OrderId, SymbolId};

/// An order as reported by the orders endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: OrderId,
    /// Symbol
    pub symbol: String,
    /// Internal symbol id
    pub symbol_id: SymbolId,
    /// Total quantity
    pub total_quantity: Decimal,
    /// Quantity still open
    #[serde(default)]
    pub open_quantity: Option<Decimal>,
    /// Quantity filled
    #[serde(default)]
    pub filled_quantity: Option<Decimal>,
    /// Quantity canceled
    #[serde(default)]
    pub canceled_quantity: Option<Decimal>,
    /// Side
    pub side: OrderSide,
    /// Order type (e.g. "Limit", "Market", "StopLimit")
    pub order_type: String,
    /// Limit price
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Stop price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// All-or-none flag
    #[serde(default)]
    pub is_all_or_none: bool,
    /// Anonymous flag
    #[serde(default)]
    pub is_anonymous: bool,
    /// Iceberg quantity
    #[serde(default)]
    pub iceberg_quantity: Option<Decimal>,
    /// Minimum fill quantity
    #[serde(default)]
    pub min_quantity: Option<Decimal>,
    /// Average execution price
    #[serde(default)]
    pub avg_exec_price: Option<Decimal>,
    /// Last execution price
    #[serde(default)]
    pub last_exec_price: Option<Decimal>,
    /// Source the order originated from
    #[serde(default)]
    pub source: Option<String>,
    /// Time in force (e.g. "Day", "GoodTillCanceled")
    #[serde(default)]
    pub time_in_force: Option<String>,
    /// Good-till date
    #[serde(default)]
    pub gtd_date: Option<DateTime<FixedOffset>>,
    /// Lifecycle state
    pub state: OrderState,
    /// Rejection reason, if rejected
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Id of the first order in this order's replace chain
    #[serde(default)]
    pub chain_id: Option<OrderId>,
    /// Creation time
    pub creation_time: DateTime<FixedOffset>,
    /// Last update time
    #[serde(default)]
    pub update_time: Option<DateTime<FixedOffset>>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Primary route
    #[serde(default)]
    pub primary_route: Option<String>,
    /// Secondary route
    #[serde(default)]
    pub secondary_route: Option<String>,
    /// Order route
    #[serde(default)]
    pub order_route: Option<String>,
    /// Venue holding the order
    #[serde(default)]
    pub venue_holding_order: Option<String>,
    /// Commission charged
    #[serde(default)]
    pub comission_charged: Option<Decimal>,
    /// Exchange order id
    #[serde(default)]
    pub exchange_order_id: Option<String>,
    /// Whether placed by a significant shareholder
    #[serde(default)]
    pub is_significant_share_holder: bool,
    /// Whether placed by an insider
    #[serde(default)]
    pub is_insider: bool,
    /// Whether limit offset is in dollars
    #[serde(default)]
    pub is_limit_offset_in_dollar: bool,
    /// User id that placed the order
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Placement commission
    #[serde(default)]
    pub placement_commission: Option<Decimal>,
    /// Strategy type (e.g. "SingleLeg")
    #[serde(default)]
    pub strategy_type: Option<String>,
    /// Trigger stop price
    #[serde(default)]
    pub trigger_stop_price: Option<Decimal>,
    /// Order group id
    #[serde(default)]
    pub order_group_id: Option<u64>,
    /// Order class
    #[serde(default)]
    pub order_class: Option<String>,
}

/// A fill against an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    /// Symbol
    pub symbol: String,
    /// Internal symbol id
    pub symbol_id: SymbolId,
    /// Quantity
    pub quantity: Decimal,
    /// Side
    pub side: OrderSide,
    /// Price
    pub price: Decimal,
    /// Execution id
    pub id: u64,
    /// Order id
    pub order_id: OrderId,
    /// Id of the first order in the replace chain
    #[serde(default)]
    pub order_chain_id: Option<OrderId>,
    /// Exchange execution id
    #[serde(default)]
    pub exchange_exec_id: Option<String>,
    /// Execution timestamp
    pub timestamp: DateTime<FixedOffset>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Venue
    #[serde(default)]
    pub venue: Option<String>,
    /// Total cost
    #[serde(default)]
    pub total_cost: Option<Decimal>,
    /// Order placement commission
    #[serde(default)]
    pub order_placement_commission: Option<Decimal>,
    /// Commission
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Execution fee
    #[serde(default)]
    pub execution_fee: Option<Decimal>,
    /// SEC fee
    #[serde(default)]
    pub sec_fee: Option<Decimal>,
    /// Canadian execution fee
    #[serde(default)]
    pub canadian_execution_fee: Option<Decimal>,
    /// Parent id
    #[serde(default)]
    pub parent_id: Option<u64>,
}
