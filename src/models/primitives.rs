//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around identifiers
//! to prevent mixing up different types of IDs at compile time.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed account number.
///
/// # Example
///
/// ```
/// use questrade_rs::AccountNumber;
///
/// let account = AccountNumber::new("26598145");
/// println!("Account: {}", account);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Create a new account number from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the account number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AccountNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Internal Questrade symbol identifier (e.g. `8049` for AAPL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(u64);

impl SymbolId {
    /// Create a new symbol id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SymbolId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A strongly-typed order ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create a new order ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A non-empty list of numeric identifiers sent as one query parameter.
///
/// Questrade accepts several ids in one call as a comma-joined list
/// (`ids=8049,9291`). `IdList` normalizes any sequence of ids into that
/// wire form once, at the boundary.
///
/// # Example
///
/// ```
/// use questrade_rs::{IdList, SymbolId};
///
/// let ids = IdList::from([SymbolId::new(8049), SymbolId::new(9291)]);
/// assert_eq!(ids.to_wire(), "8049,9291");
///
/// let single = IdList::from(8049u64);
/// assert_eq!(single.to_wire(), "8049");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(Vec<u64>);

impl IdList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id.
    pub fn push(&mut self, id: impl Into<u64>) {
        self.0.push(id.into());
    }

    /// Number of ids in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list holds no ids.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The ids as a slice.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Comma-joined wire representation.
    pub fn to_wire(&self) -> String {
        self.0
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Fail with [`Error::InvalidInput`](crate::Error::InvalidInput) when empty.
    pub(crate) fn require_non_empty(&self, what: &str) -> crate::Result<()> {
        if self.is_empty() {
            return Err(crate::Error::InvalidInput(format!(
                "at least one {} is required",
                what
            )));
        }
        Ok(())
    }
}

impl From<SymbolId> for u64 {
    fn from(id: SymbolId) -> Self {
        id.0
    }
}

impl From<OrderId> for u64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl From<u64> for IdList {
    fn from(id: u64) -> Self {
        Self(vec![id])
    }
}

impl From<SymbolId> for IdList {
    fn from(id: SymbolId) -> Self {
        Self(vec![id.0])
    }
}

impl From<OrderId> for IdList {
    fn from(id: OrderId) -> Self {
        Self(vec![id.0])
    }
}

impl<T: Into<u64>> From<Vec<T>> for IdList {
    fn from(ids: Vec<T>) -> Self {
        ids.into_iter().collect()
    }
}

impl<T: Into<u64>, const N: usize> From<[T; N]> for IdList {
    fn from(ids: [T; N]) -> Self {
        ids.into_iter().collect()
    }
}

impl<T: Into<u64>> FromIterator<T> for IdList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

/// Format an instant the way Questrade expects date-range parameters:
/// ISO-8601 with offset, whole seconds (`2011-02-01T00:00:00-05:00`).
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use questrade_rs::models::format_api_datetime;
///
/// let est = FixedOffset::west_opt(5 * 3600).unwrap();
/// let dt = est.with_ymd_and_hms(2011, 2, 1, 0, 0, 0).unwrap();
/// assert_eq!(format_api_datetime(&dt), "2011-02-01T00:00:00-05:00");
/// ```
pub fn format_api_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// API server environment.
///
/// The two environments differ only in the authentication host; the API
/// server used for every other call is returned by the token exchange.
///
/// # Example
///
/// ```
/// use questrade_rs::Environment;
///
/// let env = Environment::Sandbox;
/// println!("Auth URL: {}", env.auth_url());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live account.
    #[default]
    Production,
    /// Practice account.
    Sandbox,
}

impl Environment {
    /// Get the refresh-token exchange endpoint.
    pub fn auth_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://login.questrade.com/oauth2/token",
            Environment::Sandbox => "https://practicelogin.questrade.com/oauth2/token",
        }
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_account_number() {
        let account = AccountNumber::new("26598145");
        assert_eq!(account.as_str(), "26598145");
        assert_eq!(account.to_string(), "26598145");
    }

    #[test]
    fn test_id_list_wire_format() {
        let ids: IdList = vec![SymbolId::new(8049), SymbolId::new(9291), SymbolId::new(1)].into();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids.to_wire(), "8049,9291,1");
        assert_eq!(IdList::from(OrderId::new(173577870)).to_wire(), "173577870");
    }

    #[test]
    fn test_id_list_rejects_empty() {
        let ids = IdList::new();
        assert!(ids.is_empty());
        assert!(ids.require_non_empty("symbol id").is_err());
        assert!(IdList::from(1u64).require_non_empty("symbol id").is_ok());
    }

    #[test]
    fn test_format_api_datetime_utc() {
        let dt = Utc.with_ymd_and_hms(2022, 9, 28, 14, 30, 5).unwrap();
        assert_eq!(format_api_datetime(&dt.fixed_offset()), "2022-09-28T14:30:05+00:00");
    }

    #[test]
    fn test_format_api_datetime_drops_subseconds() {
        let est = FixedOffset::west_opt(4 * 3600).unwrap();
        let dt = est
            .with_ymd_and_hms(2014, 10, 24, 12, 14, 42)
            .unwrap()
            + chrono::Duration::milliseconds(730);
        assert_eq!(format_api_datetime(&dt), "2014-10-24T12:14:42-04:00");
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Production.auth_url(),
            "https://login.questrade.com/oauth2/token"
        );
        assert_eq!(
            Environment::Sandbox.auth_url(),
            "https://practicelogin.questrade.com/oauth2/token"
        );
        assert_eq!(Environment::default(), Environment::Production);
    }
}
