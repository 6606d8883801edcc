//! Symbols service: search, symbol details and option chains.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::ClientInner;
use crate::models::{ChainExpiry, IdList, SymbolDetail, SymbolId, SymbolSearchResult};
use crate::{Error, Result};

/// Service for symbol lookups.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: questrade_rs::QuestradeClient) -> questrade_rs::Result<()> {
/// let hits = client.symbols().search("BMO", None).await?;
/// for hit in hits {
///     println!("{} ({}): {}", hit.symbol, hit.symbol_id, hit.description);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SymbolsService {
    inner: Arc<ClientInner>,
}

#[derive(Deserialize)]
struct SymbolsResponse {
    symbols: Vec<SymbolDetail>,
}

impl SymbolsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Search for symbols whose ticker or description starts with `prefix`.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Leading characters to match
    /// * `offset` - Number of hits to skip, for paging through results
    pub async fn search(&self, prefix: &str, offset: Option<u32>) -> Result<Vec<SymbolSearchResult>> {
        if prefix.trim().is_empty() {
            return Err(Error::InvalidInput("search prefix is empty".to_string()));
        }

        #[derive(Serialize)]
        struct Query<'a> {
            prefix: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            offset: Option<u32>,
        }

        #[derive(Deserialize)]
        struct Response {
            symbols: Vec<SymbolSearchResult>,
        }

        let response: Response = self
            .inner
            .get_with_query("/v1/symbols/search", &Query { prefix, offset })
            .await?;
        Ok(response.symbols)
    }

    /// Get details for symbols by id.
    pub async fn by_ids(&self, ids: impl Into<IdList>) -> Result<Vec<SymbolDetail>> {
        let ids = ids.into();
        ids.require_non_empty("symbol id")?;

        let response: SymbolsResponse = self
            .inner
            .get_with_query("/v1/symbols", &[("ids", ids.to_wire())])
            .await?;
        Ok(response.symbols)
    }

    /// Get details for symbols by ticker (e.g. `"AAPL"`, `"BMO.TO"`).
    pub async fn by_names<I, S>(&self, names: I) -> Result<Vec<SymbolDetail>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(Error::InvalidInput(
                "at least one symbol name is required".to_string(),
            ));
        }

        let response: SymbolsResponse = self
            .inner
            .get_with_query("/v1/symbols", &[("names", names.join(","))])
            .await?;
        Ok(response.symbols)
    }

    /// Get details for one symbol.
    pub async fn get(&self, symbol_id: SymbolId) -> Result<Option<SymbolDetail>> {
        let response: SymbolsResponse = self
            .inner
            .get(&format!("/v1/symbols/{}", symbol_id))
            .await?;
        Ok(response.symbols.into_iter().next())
    }

    /// Get the option chain of an underlying, one entry per expiry.
    pub async fn options(&self, symbol_id: SymbolId) -> Result<Vec<ChainExpiry>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            option_chain: Vec<ChainExpiry>,
        }

        let response: Response = self
            .inner
            .get(&format!("/v1/symbols/{}/options", symbol_id))
            .await?;
        Ok(response.option_chain)
    }
}
