//! Accounts service: balances, positions, activities, orders and executions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::paginated::RangeStreamBuilder;
use crate::client::{ClientInner, DateRange, RangeStream};
use crate::models::{
    Account, AccountBalances, AccountList, AccountNumber, Activity, Execution, IdList, Order,
    OrderId, OrderStateFilter, Position,
};
use crate::Result;

/// Service for account-related operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: questrade_rs::QuestradeClient) -> questrade_rs::Result<()> {
/// let accounts = client.accounts().list().await?;
/// for account in &accounts.accounts {
///     println!("{} {} ({})", account.account_type, account.number, account.status);
/// }
///
/// if let Some(tfsa) = accounts.find_by_type("TFSA") {
///     let positions = client.accounts().positions(&tfsa.number).await?;
///     println!("{} open positions", positions.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

#[derive(Deserialize)]
struct PositionsResponse {
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct ActivitiesResponse {
    activities: Vec<Activity>,
}

#[derive(Deserialize)]
struct OrdersResponse {
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct ExecutionsResponse {
    executions: Vec<Execution>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the accounts the current token is authorized for.
    pub async fn list(&self) -> Result<AccountList> {
        self.inner.get("/v1/accounts").await
    }

    /// Find the first account of the given type (e.g. `"TFSA"`, `"Margin"`).
    ///
    /// Returns `Ok(None)` if the user holds no account of that type.
    pub async fn find_by_type(&self, account_type: &str) -> Result<Option<Account>> {
        let accounts = self.list().await?;
        Ok(accounts.find_by_type(account_type).cloned())
    }

    /// Get current and start-of-day balances.
    pub async fn balances(&self, account_number: &AccountNumber) -> Result<AccountBalances> {
        self.inner
            .get(&format!("/v1/accounts/{}/balances", account_number))
            .await
    }

    /// Get positions.
    pub async fn positions(&self, account_number: &AccountNumber) -> Result<Vec<Position>> {
        let response: PositionsResponse = self
            .inner
            .get(&format!("/v1/accounts/{}/positions", account_number))
            .await?;
        Ok(response.positions)
    }

    /// Stream account activities over `range`.
    ///
    /// The range is fetched in windows of at most
    /// [`MAX_WINDOW_DAYS`](crate::client::MAX_WINDOW_DAYS) days, oldest first.
    pub fn activities(&self, account_number: &AccountNumber, range: DateRange) -> RangeStream<Activity> {
        RangeStreamBuilder::new(
            self.inner.clone(),
            format!("/v1/accounts/{}/activities", account_number),
            range,
            |r: ActivitiesResponse| r.activities,
        )
        .build()
    }

    /// Stream orders over `range`, restricted by `state`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chrono::Utc;
    /// use futures_util::TryStreamExt;
    /// use questrade_rs::{AccountNumber, DateRange, OrderStateFilter};
    ///
    /// # async fn example(client: questrade_rs::QuestradeClient) -> questrade_rs::Result<()> {
    /// let account = AccountNumber::new("26598145");
    /// let range = DateRange::since(Utc::now() - chrono::Duration::days(90))?;
    /// let open: Vec<_> = client
    ///     .accounts()
    ///     .orders(&account, range, OrderStateFilter::Open)
    ///     .try_collect()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn orders(
        &self,
        account_number: &AccountNumber,
        range: DateRange,
        state: OrderStateFilter,
    ) -> RangeStream<Order> {
        #[derive(Serialize, Clone)]
        #[serde(rename_all = "camelCase")]
        struct OrdersQuery {
            state_filter: OrderStateFilter,
        }

        RangeStreamBuilder::new(
            self.inner.clone(),
            format!("/v1/accounts/{}/orders", account_number),
            range,
            |r: OrdersResponse| r.orders,
        )
        .build_with_query(Some(OrdersQuery { state_filter: state }))
    }

    /// Get specific orders by id, regardless of when they were placed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) if `ids` is empty.
    pub async fn orders_by_ids(
        &self,
        account_number: &AccountNumber,
        ids: impl Into<IdList>,
    ) -> Result<Vec<Order>> {
        let ids = ids.into();
        ids.require_non_empty("order id")?;

        let response: OrdersResponse = self
            .inner
            .get_with_query(
                &format!("/v1/accounts/{}/orders", account_number),
                &[("ids", ids.to_wire())],
            )
            .await?;
        Ok(response.orders)
    }

    /// Get a single order.
    pub async fn order(&self, account_number: &AccountNumber, order_id: OrderId) -> Result<Option<Order>> {
        let response: OrdersResponse = self
            .inner
            .get(&format!("/v1/accounts/{}/orders/{}", account_number, order_id))
            .await?;
        Ok(response.orders.into_iter().next())
    }

    /// Stream executions over `range`.
    ///
    /// Questrade only keeps a short recent history of executions; older
    /// windows come back empty however far back `range` reaches. Use
    /// [`activities`](Self::activities) for older trades.
    pub fn executions(&self, account_number: &AccountNumber, range: DateRange) -> RangeStream<Execution> {
        RangeStreamBuilder::new(
            self.inner.clone(),
            format!("/v1/accounts/{}/executions", account_number),
            range,
            |r: ExecutionsResponse| r.executions,
        )
        .build()
    }
}
