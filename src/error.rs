//! Error types for the Questrade API client.
//!
//! Every accessor returns [`Result`]. The variants map one-to-one onto the
//! ways a call can fail: the refresh-token exchange, a rejected request, a
//! failing server, a timeout, or a payload that does not decode.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Questrade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why authentication failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// The authentication host could not be reached or answered with a 5xx.
    Network,
    /// The refresh token was rejected (expired, already used, or never valid).
    ///
    /// This is terminal: a new token has to be generated manually in the
    /// Questrade App Hub and written to the token file.
    InvalidRefreshToken,
    /// The authentication host answered 2xx with a body that is not a token grant.
    MalformedResponse,
    /// An API call was rejected with 401 again after a forced refresh.
    Rejected,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::Network => write!(f, "network"),
            AuthFailure::InvalidRefreshToken => write!(f, "invalid refresh token"),
            AuthFailure::MalformedResponse => write!(f, "malformed response"),
            AuthFailure::Rejected => write!(f, "rejected"),
        }
    }
}

/// The main error type for all Questrade API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP client could not be constructed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API server could not be reached or the connection broke
    /// (connection refused, TLS failure, reset). Counted as a server error.
    #[error("Network error: {source}")]
    Network {
        /// Underlying transport failure
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Refresh-token exchange failed, or a request was rejected after re-authenticating
    #[error("Authentication failed ({kind}): {message}")]
    Authentication {
        /// What went wrong
        kind: AuthFailure,
        /// Human-readable detail
        message: String,
    },

    /// The API rejected the request with a 4xx other than 401
    #[error("Request error: status={status}, code={code:?}, message={message}")]
    Request {
        /// HTTP status code
        status: u16,
        /// Questrade error code, if the payload carried one
        code: Option<i64>,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The API answered with a 5xx
    #[error("Server error: status={status}, message={message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// No response within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The refresh-token file could not be read or written
    #[error("Token file {path:?}: {source}")]
    TokenStore {
        /// Location of the token file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// An authenticated call was made before [`Session::connect`](crate::Session::connect)
    #[error("Session is not connected")]
    NotConnected,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried by the caller.
    ///
    /// # Example
    ///
    /// ```
    /// use questrade_rs::Error;
    ///
    /// fn handle_error(err: Error) {
    ///     if err.is_retryable() {
    ///         println!("Retrying operation...");
    ///     }
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Network { .. } | Error::Timeout | Error::Server { .. }
        ) || matches!(
            self,
            Error::Authentication {
                kind: AuthFailure::Network,
                ..
            }
        )
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication { .. } | Error::NotConnected)
    }

    /// Returns `true` if a new manually issued refresh token is required.
    pub fn needs_manual_token(&self) -> bool {
        matches!(
            self,
            Error::Authentication {
                kind: AuthFailure::InvalidRefreshToken,
                ..
            }
        )
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Request { .. } | Error::InvalidInput(_) | Error::Config(_)
        )
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Server { .. } | Error::Network { .. })
    }

    /// Create a request or server error from a non-2xx response.
    ///
    /// Questrade reports failures as `{"code": 1002, "message": "..."}`.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let code = body.get("code").and_then(|c| c.as_i64());

        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        if status >= 500 {
            Error::Server {
                status,
                message,
                body,
            }
        } else {
            Error::Request {
                status,
                code,
                message,
                body,
            }
        }
    }

    pub(crate) fn auth(kind: AuthFailure, message: impl Into<String>) -> Self {
        Error::Authentication {
            kind,
            message: message.into(),
        }
    }
}
