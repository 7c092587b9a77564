//! Generic data store contract.
//!
//! One CRUD surface covers every collection; the row types in
//! [`crate::records`] bind themselves to collection names through the
//! [`Record`] trait, so call sites stay typed end to end.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A typed row belonging to a named collection.
///
/// Implementations live next to the record structs; the store uses
/// `COLLECTION` to route requests and the serde bounds to decode rows at
/// the boundary.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection this record type is stored in.
    const COLLECTION: &'static str;
}

/// A conjunction of equality clauses.
///
/// # Examples
///
/// ```
/// use fournil_reservation::providers::Filter;
///
/// let filter = Filter::new()
///     .eq("customer_email", "marie@example.com")
///     .eq("status", "pending");
/// assert_eq!(filter.clauses().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    /// An empty filter matching every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality clause.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.clauses.push((column.into(), value.to_string()));
        self
    }

    /// The accumulated clauses in insertion order.
    #[must_use]
    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }

    /// Whether the filter has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Sort order for a select.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// Column to sort by.
    pub column: String,
    /// Sort direction.
    pub descending: bool,
}

impl OrderBy {
    /// Ascending order on `column`.
    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    /// Descending order on `column`.
    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// An authenticated session returned by [`DataStore::sign_in`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for subsequent requests.
    pub access_token: String,

    /// Token type, usually "bearer".
    #[serde(default)]
    pub token_type: Option<String>,

    /// Seconds until the token expires.
    #[serde(default)]
    pub expires_in: Option<u64>,

    /// Refresh token, when the backend issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Generic data store over named collections.
///
/// The production implementation is [`crate::providers::SupabaseStore`];
/// tests use `MockDataStore`. Implementations are cheap to clone so
/// reducers can move them into effect futures.
pub trait DataStore: Clone + Send + Sync + 'static {
    /// Select rows matching `filter`, optionally ordered.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store cannot be reached
    /// - The store rejects the request
    /// - A returned row does not decode into `R`
    fn select<R: Record>(
        &self,
        filter: Filter,
        order: Option<OrderBy>,
    ) -> impl std::future::Future<Output = Result<Vec<R>>> + Send;

    /// Insert rows and return their stored representation.
    ///
    /// The insert type `I` and the returned type `R` differ when the
    /// database fills in server-assigned columns (ids, timestamps).
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store cannot be reached
    /// - The store rejects the request
    /// - A returned row does not decode into `R`
    fn insert<I: Record, R: Record>(
        &self,
        rows: &[I],
    ) -> impl std::future::Future<Output = Result<Vec<R>>> + Send;

    /// Patch columns on every row matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be reached or rejects the request.
    fn update<R: Record>(
        &self,
        patch: serde_json::Value,
        filter: Filter,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Delete every row matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be reached or rejects the request.
    fn delete<R: Record>(
        &self,
        filter: Filter,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Authenticate with email and password.
    ///
    /// On success the implementation keeps the session token and uses it
    /// for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns error if the auth endpoint cannot be reached or rejects the
    /// credentials.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Session>> + Send;

    /// End the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the auth endpoint rejects the request.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accumulates_clauses_in_order() {
        let filter = Filter::new().eq("status", "pending").eq("id", 7);
        assert_eq!(
            filter.clauses(),
            &[
                ("status".to_string(), "pending".to_string()),
                ("id".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_has_no_clauses() {
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn order_by_directions() {
        assert!(!OrderBy::asc("created_at").descending);
        assert!(OrderBy::desc("created_at").descending);
    }

    #[test]
    fn session_decodes_with_missing_optionals() {
        let session: Session =
            serde_json::from_str(r#"{"access_token":"tok"}"#).expect("decode");
        assert_eq!(session.access_token, "tok");
        assert!(session.refresh_token.is_none());
    }
}
