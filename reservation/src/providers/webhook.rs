//! Best-effort reservation announcement.
//!
//! After a reservation is persisted the workflow posts its denormalized
//! details to an external automation endpoint. Delivery is advisory: the
//! caller logs a failure and moves on, it never blocks the workflow.

use reqwest::Client;

use crate::error::{ReservationError, Result};
use crate::records::ReservationDetails;

/// Receives newly persisted reservations.
pub trait WebhookSink: Clone + Send + Sync + 'static {
    /// Deliver the reservation details to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::WebhookFailed`] when the endpoint could
    /// not be reached or rejected the payload.
    fn deliver(
        &self,
        details: &ReservationDetails,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Sink that POSTs reservation details as JSON to a fixed URL.
#[derive(Clone)]
pub struct HttpWebhook {
    client: Client,
    url: String,
}

impl HttpWebhook {
    /// Create a sink targeting `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl WebhookSink for HttpWebhook {
    async fn deliver(&self, details: &ReservationDetails) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(details)
            .send()
            .await
            .map_err(|e| ReservationError::WebhookFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, body = %body, "webhook response");

        if status.is_success() {
            Ok(())
        } else {
            Err(ReservationError::WebhookFailed {
                message: format!("{}: {body}", status.as_u16()),
            })
        }
    }
}
