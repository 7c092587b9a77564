//! Supabase data store implementation.
//!
//! Speaks the PostgREST dialect for collections (`/rest/v1/{collection}`
//! with `column=eq.value` filters) and the GoTrue dialect for
//! authentication (`/auth/v1/token`, `/auth/v1/logout`). After a
//! successful sign-in the session token replaces the anonymous key as the
//! bearer; the `apikey` header always carries the anonymous key.

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::RwLock;

use crate::config::SupabaseConfig;
use crate::error::{ReservationError, Result};
use crate::providers::store::{DataStore, Filter, OrderBy, Record, Session};

/// Supabase-backed [`DataStore`].
///
/// Cheap to clone; clones share the HTTP connection pool and the session
/// token, so a sign-in through one handle authenticates them all.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    config: SupabaseConfig,
    session_token: Arc<RwLock<Option<String>>>,
}

impl SupabaseStore {
    /// Create a new store for the given project.
    #[must_use]
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            session_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a store configured from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::MissingEnv`] if either variable is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SupabaseConfig::from_env()?))
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{collection}", self.config.project_url)
    }

    /// Bearer for data requests: the session token once signed in,
    /// otherwise the anonymous key.
    async fn bearer(&self) -> String {
        let token = self.session_token.read().await;
        token
            .clone()
            .unwrap_or_else(|| self.config.api_key.clone())
    }

    fn filter_params(filter: &Filter) -> Vec<(String, String)> {
        filter
            .clauses()
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{value}")))
            .collect()
    }

    async fn decode_rows<R: Record>(response: reqwest::Response) -> Result<Vec<R>> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReservationError::StoreRejected {
                collection: R::COLLECTION,
                status: status.as_u16(),
                message: body,
            });
        }

        // Decode in two steps so an undecodable body surfaces as a typed
        // error naming the collection
        let body = response
            .text()
            .await
            .map_err(|e| ReservationError::StoreUnreachable(e.to_string()))?;

        serde_json::from_str::<Vec<R>>(&body).map_err(|e| ReservationError::MalformedRow {
            collection: R::COLLECTION,
            message: e.to_string(),
        })
    }

    async fn expect_success(
        response: reqwest::Response,
        collection: &'static str,
    ) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ReservationError::StoreRejected {
                collection,
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

impl DataStore for SupabaseStore {
    async fn select<R: Record>(&self, filter: Filter, order: Option<OrderBy>) -> Result<Vec<R>> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(Self::filter_params(&filter));
        if let Some(order) = order {
            let direction = if order.descending { "desc" } else { "asc" };
            params.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }

        let response = self
            .client
            .get(self.collection_url(R::COLLECTION))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.bearer().await))
            .query(&params)
            .send()
            .await
            .map_err(|e| ReservationError::StoreUnreachable(e.to_string()))?;

        Self::decode_rows(response).await
    }

    async fn insert<I: Record, R: Record>(&self, rows: &[I]) -> Result<Vec<R>> {
        let response = self
            .client
            .post(self.collection_url(I::COLLECTION))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.bearer().await))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await
            .map_err(|e| ReservationError::StoreUnreachable(e.to_string()))?;

        Self::decode_rows(response).await
    }

    async fn update<R: Record>(&self, patch: serde_json::Value, filter: Filter) -> Result<()> {
        let response = self
            .client
            .patch(self.collection_url(R::COLLECTION))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.bearer().await))
            .query(&Self::filter_params(&filter))
            .json(&patch)
            .send()
            .await
            .map_err(|e| ReservationError::StoreUnreachable(e.to_string()))?;

        Self::expect_success(response, R::COLLECTION).await
    }

    async fn delete<R: Record>(&self, filter: Filter) -> Result<()> {
        let response = self
            .client
            .delete(self.collection_url(R::COLLECTION))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.bearer().await))
            .query(&Self::filter_params(&filter))
            .send()
            .await
            .map_err(|e| ReservationError::StoreUnreachable(e.to_string()))?;

        Self::expect_success(response, R::COLLECTION).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .client
            .post(format!("{}/auth/v1/token", self.config.project_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ReservationError::StoreUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReservationError::AuthFailed {
                message: format!("{}: {body}", status.as_u16()),
            });
        }

        let session = response
            .json::<Session>()
            .await
            .map_err(|e| ReservationError::AuthFailed {
                message: e.to_string(),
            })?;

        *self.session_token.write().await = Some(session.access_token.clone());

        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        // Drop the local session first; the remote revocation is an extra
        let token = self.session_token.write().await.take();

        let Some(token) = token else {
            return Ok(());
        };

        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.config.project_url))
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| ReservationError::StoreUnreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ReservationError::AuthFailed {
                message: format!("{}: {body}", status.as_u16()),
            })
        }
    }
}
