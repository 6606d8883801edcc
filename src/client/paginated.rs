//! Date-range pagination for time-bounded endpoints.
//!
//! Questrade caps the span a single activities, orders, executions or
//! candles request may cover. This module splits a [`DateRange`] into
//! [`DateWindow`]s no longer than that cap and exposes the concatenated
//! results as a [`RangeStream`] implementing the `Stream` trait.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::{DateTime, Duration, FixedOffset, Local};
use futures_util::Stream;
use serde::{de::DeserializeOwned, Serialize};

use super::ClientInner;
use crate::models::format_api_datetime;
use crate::{Error, Result};

/// Longest span, in days, that one ranged request may cover.
pub const MAX_WINDOW_DAYS: i64 = 30;

/// One closed interval of a [`DateRange`], fetched with a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive start
    pub start: DateTime<FixedOffset>,
    /// Inclusive end
    pub end: DateTime<FixedOffset>,
}

/// A `[start, end]` interval to be fetched in bounded windows.
///
/// # Example
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use questrade_rs::DateRange;
///
/// let est = FixedOffset::west_opt(5 * 3600).unwrap();
/// let range = DateRange::new(
///     est.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
///     Some(est.with_ymd_and_hms(2022, 4, 6, 0, 0, 0).unwrap()),
/// )?;
/// assert_eq!(range.windows().len(), 4);
/// # Ok::<(), questrade_rs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    max_span: Duration,
}

impl DateRange {
    /// Create a range from `start` to `end`, or to now when `end` is `None`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `end` is before `start`.
    pub fn new(
        start: impl Into<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    ) -> Result<Self> {
        let start = start.into();
        let end = end.unwrap_or_else(|| Local::now().fixed_offset());
        if end < start {
            return Err(Error::InvalidInput(format!(
                "range end {} is before start {}",
                format_api_datetime(&end),
                format_api_datetime(&start)
            )));
        }
        Ok(Self {
            start,
            end,
            max_span: Duration::days(MAX_WINDOW_DAYS),
        })
    }

    /// Create a range from `start` up to now.
    pub fn since(start: impl Into<DateTime<FixedOffset>>) -> Result<Self> {
        Self::new(start, None)
    }

    /// Override the longest span a single window may cover.
    pub fn with_max_span(mut self, max_span: Duration) -> Result<Self> {
        if max_span <= Duration::zero() {
            return Err(Error::InvalidInput("window span must be positive".to_string()));
        }
        self.max_span = max_span;
        Ok(self)
    }

    /// Start of the range.
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    /// End of the range.
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Longest span of a single window.
    pub fn max_span(&self) -> Duration {
        self.max_span
    }

    /// Split the range into consecutive windows.
    ///
    /// Adjacent windows share their boundary instant and the last one ends
    /// exactly at [`end`](Self::end). A range no longer than the maximum
    /// span, including an empty one, produces a single window.
    pub fn windows(&self) -> Vec<DateWindow> {
        let mut windows = Vec::new();
        let mut cursor = self.start;
        loop {
            let next = cursor
                .checked_add_signed(self.max_span)
                .map_or(self.end, |t| t.min(self.end));
            windows.push(DateWindow {
                start: cursor,
                end: next,
            });
            if next >= self.end {
                break;
            }
            cursor = next;
        }
        windows
    }
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

type FetchWindow<T> = Box<dyn Fn(DateWindow) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync>;

/// A stream that lazily fetches the windows of a [`DateRange`].
///
/// Windows are requested one at a time, oldest first, and only when the
/// items of the previous window have been consumed. If a request fails the
/// stream yields that error and then ends; items already yielded stay
/// valid.
///
/// # Example
///
/// ```no_run
/// use chrono::{FixedOffset, TimeZone};
/// use futures_util::StreamExt;
/// use questrade_rs::{AccountNumber, DateRange};
///
/// # async fn example(client: questrade_rs::QuestradeClient) -> questrade_rs::Result<()> {
/// let account = AccountNumber::new("26598145");
/// let est = FixedOffset::west_opt(5 * 3600).unwrap();
/// let range = DateRange::since(est.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())?;
///
/// let mut stream = client.accounts().activities(&account, range);
/// while let Some(result) = stream.next().await {
///     let activity = result?;
///     println!("{} {}", activity.trade_date, activity.description);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RangeStream<T> {
    fetch_window: FetchWindow<T>,
    windows: VecDeque<DateWindow>,
    items: VecDeque<T>,
    pending_fetch: Option<BoxFuture<'static, Result<Vec<T>>>>,
}

impl<T> RangeStream<T>
where
    T: Send + 'static,
{
    /// Create a stream that calls `fetch_window` for each window in order.
    pub fn new<F>(windows: Vec<DateWindow>, fetch_window: F) -> Self
    where
        F: Fn(DateWindow) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_window: Box::new(fetch_window),
            windows: windows.into(),
            items: VecDeque::new(),
            pending_fetch: None,
        }
    }

    /// Number of windows not yet requested.
    pub fn remaining_windows(&self) -> usize {
        self.windows.len()
    }
}

impl<T> Stream for RangeStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(items)) => {
                        this.pending_fetch = None;
                        // An empty window falls through to the next one.
                        this.items = items.into();
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.windows.clear();
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if let Some(window) = this.windows.pop_front() {
                this.pending_fetch = Some((this.fetch_window)(window));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for RangeStream<T> {}

/// Builder for ranged streams over one endpoint.
///
/// `R` is the response envelope (e.g. `{"activities": [...]}`) and
/// `extract` pulls the items out of it.
pub(crate) struct RangeStreamBuilder<R, T> {
    inner: Arc<ClientInner>,
    path: String,
    range: DateRange,
    extract: fn(R) -> Vec<T>,
}

impl<R, T> RangeStreamBuilder<R, T>
where
    R: DeserializeOwned + Send + 'static,
    T: Send + 'static,
{
    pub(crate) fn new(
        inner: Arc<ClientInner>,
        path: impl Into<String>,
        range: DateRange,
        extract: fn(R) -> Vec<T>,
    ) -> Self {
        Self {
            inner,
            path: path.into(),
            range,
            extract,
        }
    }

    /// Build the stream, sending `query` alongside every window's bounds.
    pub(crate) fn build_with_query<Q>(self, query: Option<Q>) -> RangeStream<T>
    where
        Q: Serialize + Clone + Send + Sync + 'static,
    {
        let inner = self.inner;
        let path = self.path;
        let extract = self.extract;

        RangeStream::new(self.range.windows(), move |window: DateWindow| {
            let inner = inner.clone();
            let path = path.clone();
            let query = query.clone();

            Box::pin(async move {
                #[derive(Serialize)]
                #[serde(rename_all = "camelCase")]
                struct WindowQuery<Q> {
                    start_time: String,
                    end_time: String,
                    #[serde(flatten)]
                    extra: Option<Q>,
                }

                let window_query = WindowQuery {
                    start_time: format_api_datetime(&window.start),
                    end_time: format_api_datetime(&window.end),
                    extra: query,
                };

                if inner.config.verbosity.is_basic() {
                    tracing::debug!(
                        path = %path,
                        start = %window_query.start_time,
                        end = %window_query.end_time,
                        "Fetching window"
                    );
                }

                let response = inner.get_with_query::<R, _>(&path, &window_query).await?;
                Ok(extract(response))
            })
        })
    }

    /// Build the stream without additional query parameters.
    pub(crate) fn build(self) -> RangeStream<T> {
        self.build_with_query::<()>(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use futures_util::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn est() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        est().with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = DateRange::new(date(2022, 2, 1), Some(date(2022, 1, 1))).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_single_instant_is_one_window() {
        let range = DateRange::new(date(2022, 1, 1), Some(date(2022, 1, 1))).unwrap();
        let windows = range.windows();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, windows[0].end);
    }

    #[test]
    fn test_exact_span_is_one_window() {
        let range = DateRange::new(date(2022, 1, 1), Some(date(2022, 1, 31))).unwrap();
        assert_eq!(range.windows(), vec![DateWindow { start: date(2022, 1, 1), end: date(2022, 1, 31) }]);
    }

    #[test]
    fn test_ninety_five_days() {
        let range = DateRange::new(date(2022, 1, 1), Some(date(2022, 4, 6))).unwrap();
        let starts: Vec<_> = range.windows().iter().map(|w| w.start).collect();
        assert_eq!(
            starts,
            vec![date(2022, 1, 1), date(2022, 1, 31), date(2022, 3, 2), date(2022, 4, 1)]
        );
        assert_eq!(range.windows().last().unwrap().end, date(2022, 4, 6));
    }

    #[test]
    fn test_long_range_coverage() {
        let start = date(1999, 12, 1);
        let end = est().with_ymd_and_hms(2022, 9, 28, 13, 45, 10).unwrap();
        let range = DateRange::new(start, Some(end)).unwrap();
        let windows = range.windows();

        let span = Duration::days(MAX_WINDOW_DAYS).num_seconds();
        let total = (end - start).num_seconds();
        assert_eq!(windows.len() as i64, (total + span - 1) / span);

        assert_eq!(windows.first().unwrap().start, start);
        assert_eq!(windows.last().unwrap().end, end);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for w in &windows {
            assert!(w.end >= w.start);
            assert!(w.end - w.start <= Duration::days(MAX_WINDOW_DAYS));
        }
    }

    #[test]
    fn test_custom_span() {
        let range = DateRange::new(date(2022, 1, 1), Some(date(2022, 1, 8)))
            .unwrap()
            .with_max_span(Duration::days(2))
            .unwrap();
        assert_eq!(range.windows().len(), 4);
        assert!(DateRange::new(date(2022, 1, 1), None)
            .unwrap()
            .with_max_span(Duration::zero())
            .is_err());
    }

    #[test]
    fn test_open_end_defaults_to_now() {
        let range = DateRange::since(date(2022, 1, 1)).unwrap();
        assert!(range.end() > date(2022, 1, 1));
    }

    fn windows_of_days(n: u32) -> Vec<DateWindow> {
        (1..=n)
            .map(|d| DateWindow { start: date(2022, 1, d), end: date(2022, 1, d + 1) })
            .collect()
    }

    #[tokio::test]
    async fn test_stream_yields_in_window_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_fetch = seen.clone();

        let stream = RangeStream::new(windows_of_days(3), move |w: DateWindow| {
            seen_in_fetch.lock().unwrap().push(w.start);
            let day = w.start.format("%d").to_string();
            Box::pin(async move {
                // The second window is empty.
                if day == "02" {
                    Ok(vec![])
                } else {
                    Ok(vec![format!("{day}-a"), format!("{day}-b")])
                }
            }) as BoxFuture<'static, Result<Vec<String>>>
        });

        let items: Vec<String> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(items, vec!["01-a", "01-b", "03-a", "03-b"]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![date(2022, 1, 1), date(2022, 1, 2), date(2022, 1, 3)]
        );
    }

    #[tokio::test]
    async fn test_stream_ends_after_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_fetch = calls.clone();

        let mut stream = RangeStream::new(windows_of_days(3), move |_w: DateWindow| {
            let n = calls_in_fetch.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if n == 1 {
                    Err(Error::Timeout)
                } else {
                    Ok(vec![n])
                }
            }) as BoxFuture<'static, Result<Vec<usize>>>
        });

        assert_eq!(stream.next().await.unwrap().unwrap(), 0);
        assert!(matches!(stream.next().await, Some(Err(Error::Timeout))));
        assert!(stream.next().await.is_none());
        assert_eq!(stream.remaining_windows(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
