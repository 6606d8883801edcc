//! Client configuration options.

use std::time::Duration;

/// How much the client reports through `tracing`.
///
/// Verbosity only gates diagnostic events; it never changes what a call
/// returns. Access and refresh tokens are never logged at any level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Only warnings and errors from the token lifecycle
    #[default]
    Off,
    /// One `debug` event per request and one `info` event per token exchange
    Basic,
    /// Everything in `Basic` plus `trace` events carrying raw response bodies
    Detailed,
}

impl Verbosity {
    /// Returns `true` for `Basic` and `Detailed`.
    pub fn is_basic(&self) -> bool {
        *self >= Verbosity::Basic
    }

    /// Returns `true` for `Detailed`.
    pub fn is_detailed(&self) -> bool {
        *self >= Verbosity::Detailed
    }
}

/// Configuration for the Questrade client.
///
/// # Example
///
/// ```
/// use questrade_rs::{ClientConfig, Verbosity};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(30))
///     .with_user_agent("my-app/1.0")
///     .with_verbosity(Verbosity::Basic);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout, applied to token exchanges and API calls alike
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Refresh the access token when it expires within this many seconds
    pub refresh_buffer_secs: i64,
    /// Override for the environment's token exchange endpoint
    pub auth_url: Option<String>,
    /// Diagnostic verbosity
    pub verbosity: Verbosity,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: format!(
                "questrade-rs/{} (Rust)",
                env!("CARGO_PKG_VERSION")
            ),
            refresh_buffer_secs: 60,
            auth_url: None,
            verbosity: Verbosity::Off,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the buffer time before expiry to refresh.
    pub fn with_refresh_buffer(mut self, secs: i64) -> Self {
        self.refresh_buffer_secs = secs;
        self
    }

    /// Send token exchanges to `url` instead of the environment's login host.
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Set the diagnostic verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub(crate) fn build_http(&self) -> crate::Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.refresh_buffer_secs, 60);
        assert!(config.auth_url.is_none());
        assert_eq!(config.verbosity, Verbosity::Off);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(3))
            .with_refresh_buffer(10)
            .with_auth_url("http://127.0.0.1:9000/oauth2/token")
            .with_verbosity(Verbosity::Detailed);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.refresh_buffer_secs, 10);
        assert_eq!(config.auth_url.as_deref(), Some("http://127.0.0.1:9000/oauth2/token"));
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(!Verbosity::Off.is_basic());
        assert!(Verbosity::Basic.is_basic());
        assert!(!Verbosity::Basic.is_detailed());
        assert!(Verbosity::Detailed.is_basic());
        assert!(Verbosity::Detailed.is_detailed());
    }
}
