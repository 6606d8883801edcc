//! Token lifecycle for Questrade API authentication.

use chrono::{DateTime, Duration, Utc};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::{RwLock, RwLockWriteGuard};
use url::Url;

use super::TokenFile;
use crate::client::{ClientConfig, Verbosity};
use crate::error::AuthFailure;
use crate::{Environment, Error, Result};

/// Authentication session for the Questrade API.
///
/// The session owns the access/refresh token pair and keeps the token file
/// in step with it. Creating a session does no I/O; call
/// [`connect`](Self::connect) to perform the first exchange.
///
/// # Thread Safety
///
/// Credentials sit behind a `tokio` `RwLock`. Every exchange runs while
/// holding the write lock and re-checks expiry after acquiring it, so
/// concurrent callers wait on a single exchange instead of each spending
/// the (single-use) refresh token.
pub struct Session {
    credentials: RwLock<Option<Credentials>>,
    http: reqwest::Client,
    auth_url: String,
    token_file: TokenFile,
    env: Environment,
    refresh_buffer: Duration,
    verbosity: Verbosity,
}

struct Credentials {
    access_token: SecretString,
    refresh_token: SecretString,
    token_type: String,
    api_server: String,
    expires_at: DateTime<Utc>,
    /// Whether `refresh_token` has reached the token file.
    persisted: bool,
}

impl Credentials {
    fn expires_within(&self, buffer: Duration) -> bool {
        Utc::now() + buffer >= self.expires_at
    }
}

/// What a request needs from the session: where to go and what to present.
pub(crate) struct Bearer {
    pub(crate) access_token: SecretString,
    token_type: String,
    api_server: String,
}

impl Bearer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_server, path.trim_start_matches('/'))
    }

    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!(
            "{} {}",
            self.token_type,
            self.access_token.expose_secret()
        ))
        .map_err(|_| Error::auth(AuthFailure::MalformedResponse, "invalid token format"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl Session {
    /// Create a disconnected session.
    ///
    /// # Arguments
    ///
    /// * `token_file` - Where the refresh token is read from and rotated into
    /// * `env` - Which login host to exchange tokens with
    /// * `config` - Timeout, refresh buffer and an optional login host override
    pub fn new(token_file: TokenFile, env: Environment, config: &ClientConfig) -> Result<Self> {
        if config.refresh_buffer_secs < 0 {
            return Err(Error::Config("refresh buffer must not be negative".to_string()));
        }
        let auth_url = config
            .auth_url
            .clone()
            .unwrap_or_else(|| env.auth_url().to_string());
        Url::parse(&auth_url)?;
        let refresh_buffer = Duration::try_seconds(config.refresh_buffer_secs)
            .ok_or_else(|| Error::Config("refresh buffer out of range".to_string()))?;

        Ok(Self {
            credentials: RwLock::new(None),
            http: config.build_http()?,
            auth_url,
            token_file,
            env,
            refresh_buffer,
            verbosity: config.verbosity,
        })
    }

    /// Exchange the refresh token stored in the token file for a fresh
    /// access/refresh token pair.
    ///
    /// On success the new refresh token replaces the old one in the token
    /// file. On failure the token file is left untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::TokenStore`] if the token file cannot be read or rewritten
    /// - [`Error::Authentication`] with [`AuthFailure::InvalidRefreshToken`]
    ///   if the token has expired or was already used; a new one must be
    ///   generated manually in the Questrade App Hub
    /// - [`Error::Authentication`] with [`AuthFailure::Network`] or
    ///   [`AuthFailure::MalformedResponse`] otherwise
    pub async fn connect(&self) -> Result<()> {
        let mut guard = self.credentials.write().await;
        let refresh_token = self.token_file.load()?;
        self.rotate(&mut guard, &refresh_token).await
    }

    /// Refresh the access token if it has expired or is about to.
    ///
    /// Called before every authenticated request. If an earlier exchange
    /// could not write its refresh token to the token file, the write is
    /// retried first and [`Error::TokenStore`] is returned until it succeeds.
    pub async fn ensure_fresh(&self) -> Result<()> {
        {
            let guard = self.credentials.read().await;
            match guard.as_ref() {
                None => return Err(Error::NotConnected),
                Some(creds) if creds.persisted && !creds.expires_within(self.refresh_buffer) => {
                    return Ok(())
                }
                Some(_) => {}
            }
        }

        let mut guard = self.credentials.write().await;
        let creds = guard.as_mut().ok_or(Error::NotConnected)?;
        if !creds.persisted {
            self.persist(creds)?;
        }
        // Another caller may have refreshed while we waited for the lock.
        if !creds.expires_within(self.refresh_buffer) {
            return Ok(());
        }
        let refresh_token = creds.refresh_token.clone();
        self.rotate(&mut guard, &refresh_token).await
    }

    /// Refresh after the server rejected `rejected`, unless another caller
    /// has already replaced that access token.
    pub(crate) async fn force_refresh(&self, rejected: &SecretString) -> Result<()> {
        let mut guard = self.credentials.write().await;
        let refresh_token = match guard.as_ref() {
            None => return Err(Error::NotConnected),
            Some(creds) if creds.access_token.expose_secret() != rejected.expose_secret() => {
                return Ok(())
            }
            Some(creds) => creds.refresh_token.clone(),
        };
        self.rotate(&mut guard, &refresh_token).await
    }

    /// Exchange the current refresh token now, regardless of expiry.
    pub async fn refresh(&self) -> Result<()> {
        let mut guard = self.credentials.write().await;
        let refresh_token = match guard.as_ref() {
            None => return Err(Error::NotConnected),
            Some(creds) => creds.refresh_token.clone(),
        };
        self.rotate(&mut guard, &refresh_token).await
    }

    pub(crate) async fn bearer(&self) -> Result<Bearer> {
        let guard = self.credentials.read().await;
        let creds = guard.as_ref().ok_or(Error::NotConnected)?;
        Ok(Bearer {
            access_token: creds.access_token.clone(),
            token_type: creds.token_type.clone(),
            api_server: creds.api_server.clone(),
        })
    }

    /// Returns `true` once [`connect`](Self::connect) has succeeded.
    pub async fn is_connected(&self) -> bool {
        self.credentials.read().await.is_some()
    }

    /// Check if the access token has expired. A disconnected session counts as expired.
    pub async fn is_expired(&self) -> bool {
        self.expires_within(Duration::zero()).await
    }

    /// Check if the access token will expire within the given buffer period.
    pub async fn expires_within(&self, buffer: Duration) -> bool {
        self.credentials
            .read()
            .await
            .as_ref()
            .map_or(true, |c| c.expires_within(buffer))
    }

    /// When the current access token expires.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.credentials.read().await.as_ref().map(|c| c.expires_at)
    }

    /// Base URL of the API server assigned at the last exchange.
    pub async fn api_server(&self) -> Option<String> {
        self.credentials
            .read()
            .await
            .as_ref()
            .map(|c| c.api_server.clone())
    }

    /// Get the environment this session authenticates against.
    pub fn environment(&self) -> Environment {
        self.env
    }

    /// The token file backing this session.
    pub fn token_file(&self) -> &TokenFile {
        &self.token_file
    }

    // Private helper methods

    /// Exchange `refresh_token`, install the new credentials, then persist
    /// the new refresh token.
    ///
    /// Credentials are swapped in one assignment after the exchange
    /// completes. If the token file cannot be written the new credentials
    /// are kept and marked unsaved; [`ensure_fresh`](Self::ensure_fresh)
    /// retries the write.
    async fn rotate(
        &self,
        guard: &mut RwLockWriteGuard<'_, Option<Credentials>>,
        refresh_token: &SecretString,
    ) -> Result<()> {
        let fresh = self.exchange(refresh_token).await?;
        let creds = guard.insert(fresh);
        self.persist(creds)
    }

    fn persist(&self, creds: &mut Credentials) -> Result<()> {
        if let Err(e) = self.token_file.save(&creds.refresh_token) {
            tracing::error!(
                path = %self.token_file.path().display(),
                error = %e,
                "Could not persist new refresh token"
            );
            return Err(e);
        }
        creds.persisted = true;
        Ok(())
    }

    async fn exchange(&self, refresh_token: &SecretString) -> Result<Credentials> {
        let response = self
            .http
            .get(&self.auth_url)
            .query(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::warn!(env = %self.env, error = %e, "Token exchange request failed");
                Error::auth(AuthFailure::Network, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let kind = if status.is_client_error() {
                AuthFailure::InvalidRefreshToken
            } else {
                AuthFailure::Network
            };
            tracing::warn!(env = %self.env, status = status.as_u16(), "Token exchange rejected");
            return Err(Error::auth(
                kind,
                format!("Token exchange failed ({}): {}", status.as_u16(), body),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::auth(AuthFailure::Network, e.without_url().to_string()))?;
        let grant: TokenGrant = serde_json::from_str(&text)
            .map_err(|e| Error::auth(AuthFailure::MalformedResponse, e.to_string()))?;
        let api_server = Url::parse(&grant.api_server).map_err(|e| {
            Error::auth(
                AuthFailure::MalformedResponse,
                format!("api_server {:?}: {}", grant.api_server, e),
            )
        })?;

        let expires_at = Some(grant.expires_in)
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                Error::auth(
                    AuthFailure::MalformedResponse,
                    format!("expires_in {} is out of range", grant.expires_in),
                )
            })?;

        if self.verbosity.is_basic() {
            tracing::info!(
                env = %self.env,
                api_server = %api_server,
                expires_in = grant.expires_in,
                "Exchanged refresh token"
            );
        }

        Ok(Credentials {
            access_token: SecretString::from(grant.access_token),
            refresh_token: SecretString::from(grant.refresh_token),
            token_type: grant.token_type,
            api_server: api_server.as_str().trim_end_matches('/').to_string(),
            expires_at,
            persisted: false,
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("env", &self.env)
            .field("auth_url", &self.auth_url)
            .field("token_file", &self.token_file.path())
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: i64,
    refresh_token: String,
    api_server: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new(
            TokenFile::new("unused"),
            Environment::Sandbox,
            &ClientConfig::default(),
        )
        .unwrap()
    }

    fn credentials(expires_in_secs: i64) -> Credentials {
        Credentials {
            access_token: SecretString::from("super-secret-token".to_string()),
            refresh_token: SecretString::from("super-secret-refresh".to_string()),
            token_type: "Bearer".to_string(),
            api_server: "https://api01.iq.questrade.com".to_string(),
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
            persisted: true,
        }
    }

    #[tokio::test]
    async fn test_session_debug_redacts_token() {
        let session = test_session();
        *session.credentials.write().await = Some(credentials(1800));

        let debug_str = format!("{:?}", session);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(!debug_str.contains("super-secret-refresh"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[tokio::test]
    async fn test_new_session_is_disconnected() {
        let session = test_session();
        assert!(!session.is_connected().await);
        assert!(session.is_expired().await);
        assert!(matches!(session.ensure_fresh().await, Err(Error::NotConnected)));
        assert!(matches!(session.bearer().await, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn test_fresh_token_skips_refresh() {
        let session = test_session();
        *session.credentials.write().await = Some(credentials(1800));

        // No auth host is reachable at the default sandbox URL in tests;
        // a refresh attempt would fail.
        session.ensure_fresh().await.unwrap();
        assert!(!session.expires_within(Duration::seconds(60)).await);
        assert!(session.expires_within(Duration::seconds(3600)).await);
    }

    #[tokio::test]
    async fn test_force_refresh_skips_replaced_token() {
        let session = test_session();
        *session.credentials.write().await = Some(credentials(1800));

        let stale = SecretString::from("an-older-token".to_string());
        session.force_refresh(&stale).await.unwrap();
    }

    #[test]
    fn test_bearer_url_and_header() {
        let bearer = Bearer {
            access_token: SecretString::from("C3lTUKuNQrAAmSD/TPjuV/HI7aNrAwDp".to_string()),
            token_type: "Bearer".to_string(),
            api_server: "https://api01.iq.questrade.com".to_string(),
        };
        assert_eq!(
            bearer.url("/v1/accounts"),
            "https://api01.iq.questrade.com/v1/accounts"
        );
        assert_eq!(
            bearer.url("v1/time"),
            "https://api01.iq.questrade.com/v1/time"
        );
        let header = bearer.header_value().unwrap();
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "Bearer C3lTUKuNQrAAmSD/TPjuV/HI7aNrAwDp");
    }

    #[test]
    fn test_invalid_auth_url_rejected() {
        let config = ClientConfig::default().with_auth_url("not a url");
        let err = Session::new(TokenFile::default(), Environment::Production, &config).unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));

        let config = ClientConfig::default().with_refresh_buffer(-1);
        let err = Session::new(TokenFile::default(), Environment::Production, &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
