//! Markets service for quotes, candles and market metadata.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::paginated::RangeStreamBuilder;
use crate::client::{ClientInner, DateRange, RangeStream};
use crate::models::{
    Candle, CandleInterval, IdList, Market, OptionQuote, OptionQuoteRequest, Quote,
    StrategyQuote, StrategyVariant, SymbolId,
};
use crate::{Error, Result};

/// Service for market data operations.
///
/// # Example
///
/// ```no_run
/// use questrade_rs::SymbolId;
///
/// # async fn example(client: questrade_rs::QuestradeClient) -> questrade_rs::Result<()> {
/// let quotes = client
///     .markets()
///     .quotes([SymbolId::new(8049), SymbolId::new(9291)])
///     .await?;
/// for quote in quotes {
///     println!("{}: bid={:?} ask={:?}", quote.symbol, quote.bid_price, quote.ask_price);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MarketsService {
    inner: Arc<ClientInner>,
}

#[derive(Deserialize)]
struct QuotesResponse {
    quotes: Vec<Quote>,
}

#[derive(Deserialize)]
struct CandlesResponse {
    candles: Vec<Candle>,
}

impl MarketsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List supported markets with their trading hours.
    pub async fn markets(&self) -> Result<Vec<Market>> {
        #[derive(Deserialize)]
        struct Response {
            markets: Vec<Market>,
        }
        let response: Response = self.inner.get("/v1/markets").await?;
        Ok(response.markets)
    }

    /// Get level 1 quotes for one or more symbols.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `ids` is empty.
    pub async fn quotes(&self, ids: impl Into<IdList>) -> Result<Vec<Quote>> {
        let ids = ids.into();
        ids.require_non_empty("symbol id")?;

        let response: QuotesResponse = self
            .inner
            .get_with_query("/v1/markets/quotes", &[("ids", ids.to_wire())])
            .await?;
        Ok(response.quotes)
    }

    /// Get the level 1 quote for a single symbol.
    pub async fn quote(&self, symbol_id: SymbolId) -> Result<Option<Quote>> {
        let response: QuotesResponse = self
            .inner
            .get(&format!("/v1/markets/quotes/{}", symbol_id))
            .await?;
        Ok(response.quotes.into_iter().next())
    }

    /// Get quotes for options selected by id and/or by filter.
    pub async fn option_quotes(&self, request: &OptionQuoteRequest) -> Result<Vec<OptionQuote>> {
        if request.is_empty() {
            return Err(Error::InvalidInput(
                "option quote request selects no options".to_string(),
            ));
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            option_quotes: Vec<OptionQuote>,
        }
        let response: Response = self
            .inner
            .post("/v1/markets/quotes/options", request)
            .await?;
        Ok(response.option_quotes)
    }

    /// Get calculated quotes for multi-leg strategies.
    pub async fn strategy_quotes(&self, variants: &[StrategyVariant]) -> Result<Vec<StrategyQuote>> {
        if variants.is_empty() {
            return Err(Error::InvalidInput(
                "at least one strategy variant is required".to_string(),
            ));
        }

        #[derive(Serialize)]
        struct Request<'a> {
            variants: &'a [StrategyVariant],
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            strategy_quotes: Vec<StrategyQuote>,
        }

        let response: Response = self
            .inner
            .post("/v1/markets/quotes/strategies", &Request { variants })
            .await?;
        Ok(response.strategy_quotes)
    }

    /// Stream historical candles for a symbol over `range`.
    ///
    /// Questrade returns at most 2000 candles per request. For fine
    /// intervals shrink the window with
    /// [`DateRange::with_max_span`] so each window stays under that cap.
    pub fn candles(
        &self,
        symbol_id: SymbolId,
        interval: CandleInterval,
        range: DateRange,
    ) -> RangeStream<Candle> {
        #[derive(Serialize, Clone)]
        struct CandlesQuery {
            interval: CandleInterval,
        }

        RangeStreamBuilder::new(
            self.inner.clone(),
            format!("/v1/markets/candles/{}", symbol_id),
            range,
            |r: CandlesResponse| r.candles,
        )
        .build_with_query(Some(CandlesQuery { interval }))
    }
}
