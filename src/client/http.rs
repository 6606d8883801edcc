//! HTTP client implementation for the Questrade API.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::api::{AccountsService, MarketsService, SymbolsService, TimeService};
use crate::auth::{Bearer, Session, TokenFile};
use crate::error::AuthFailure;
use crate::{Environment, Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the Questrade API.
///
/// This client provides access to all API services through method calls
/// that return service structs. The client manages authentication,
/// request building, and response parsing. Clones share one session.
///
/// # Example
///
/// ```no_run
/// use questrade_rs::{Environment, QuestradeClient, TokenFile};
///
/// # async fn example() -> questrade_rs::Result<()> {
/// let client = QuestradeClient::new(TokenFile::default(), Environment::Production)?;
/// client.connect().await?;
///
/// let accounts = client.accounts().list().await?;
/// if let Some(account) = accounts.accounts.first() {
///     let balances = client.accounts().balances(&account.number).await?;
///     println!("{:?}", balances.combined("CAD"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct QuestradeClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

impl QuestradeClient {
    /// Create a client with the default configuration.
    ///
    /// No network access happens until [`connect`](Self::connect).
    pub fn new(token_file: TokenFile, env: Environment) -> Result<Self> {
        Self::with_config(token_file, env, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(token_file: TokenFile, env: Environment, config: ClientConfig) -> Result<Self> {
        let session = Session::new(token_file, env, &config)?;
        Self::with_session(session, config)
    }

    /// Create a client around an existing session.
    pub fn with_session(session: Session, config: ClientConfig) -> Result<Self> {
        let http = config.build_http()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                config,
            }),
        })
    }

    /// Exchange the stored refresh token and start the session.
    pub async fn connect(&self) -> Result<()> {
        self.inner.session.connect().await
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the markets and quotes service.
    pub fn markets(&self) -> MarketsService {
        MarketsService::new(self.inner.clone())
    }

    /// Get the symbols service.
    pub fn symbols(&self) -> SymbolsService {
        SymbolsService::new(self.inner.clone())
    }

    /// Get the server time service.
    pub fn time(&self) -> TimeService {
        TimeService::new(self.inner.clone())
    }

    /// Manually refresh the session token.
    pub async fn refresh_session(&self) -> Result<()> {
        self.inner.session.refresh().await
    }

    /// Get the current environment.
    pub fn environment(&self) -> Environment {
        self.inner.session.environment()
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }
}

impl ClientInner {
    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute::<T, (), ()>(Method::GET, path, None, None).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute::<T, Q, ()>(Method::GET, path, Some(query), None)
            .await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute::<T, (), B>(Method::POST, path, None, Some(body))
            .await
    }

    /// Send an authenticated request and decode the response.
    ///
    /// A 401 triggers one forced token refresh and one retry. Nothing else
    /// is retried.
    pub(crate) async fn execute<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.session.ensure_fresh().await?;

        let bearer = self.session.bearer().await?;
        let mut response = self.send(&bearer, method.clone(), path, query, body).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if self.config.verbosity.is_basic() {
                tracing::debug!(%method, path, "Access token rejected, refreshing");
            }
            self.session.force_refresh(&bearer.access_token).await?;

            let bearer = self.session.bearer().await?;
            response = self.send(&bearer, method, path, query, body).await?;

            if response.status() == StatusCode::UNAUTHORIZED {
                let text = response.text().await.unwrap_or_default();
                tracing::warn!(path, "Access token rejected after refresh");
                return Err(Error::auth(
                    AuthFailure::Rejected,
                    format!("{} rejected the refreshed access token: {}", path, text),
                ));
            }
        }

        self.handle_response(path, response).await
    }

    async fn send<Q, B>(
        &self,
        bearer: &Bearer,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<reqwest::Response>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        if self.config.verbosity.is_basic() {
            tracing::debug!(%method, path, "Sending request");
        }

        let mut request = self
            .http
            .request(method, bearer.url(path))
            .header(AUTHORIZATION, bearer.header_value()?);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(transport_error)
    }

    /// Handle an API response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if self.config.verbosity.is_detailed() {
            tracing::trace!(path, status = status.as_u16(), body = %text, "Received response");
        }

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
            Err(Error::from_api_response(status.as_u16(), body))
        }
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Network {
            source: e.without_url(),
        }
    }
}

impl std::fmt::Debug for QuestradeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestradeClient")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish()
    }
}
