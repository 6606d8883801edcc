//! Server time service.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::client::ClientInner;
use crate::models::ServerTime;
use crate::Result;

/// Service for the API server clock.
///
/// Useful for anchoring a [`DateRange`](crate::DateRange) to the server's
/// notion of "now" and offset rather than the local machine's.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: questrade_rs::QuestradeClient) -> questrade_rs::Result<()> {
/// let now = client.time().server_time().await?;
/// println!("Server time: {}", now);
/// # Ok(())
/// # }
/// ```
pub struct TimeService {
    inner: Arc<ClientInner>,
}

impl TimeService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the current server time.
    pub async fn server_time(&self) -> Result<DateTime<FixedOffset>> {
        let response: ServerTime = self.inner.get("/v1/time").await?;
        Ok(response.time)
    }
}
