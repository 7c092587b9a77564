//! Mock webhook sink for testing.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::{ReservationError, Result};
use crate::providers::webhook::WebhookSink;
use crate::records::ReservationDetails;

/// Sink that records deliveries instead of POSTing them.
#[derive(Debug, Clone)]
pub struct MockWebhook {
    deliveries: Arc<Mutex<Vec<ReservationDetails>>>,
    should_succeed: Arc<Mutex<bool>>,
}

impl MockWebhook {
    /// Create a sink that accepts every delivery.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deliveries: Arc::new(Mutex::new(Vec::new())),
            should_succeed: Arc::new(Mutex::new(true)),
        }
    }

    /// Switch between accepting and rejecting deliveries.
    #[allow(clippy::expect_used)]
    pub fn set_should_succeed(&self, succeed: bool) {
        *self.should_succeed.lock().expect("mock webhook lock") = succeed;
    }

    /// Number of deliveries accepted so far.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.deliveries.lock().expect("mock webhook lock").len()
    }

    /// The most recent accepted delivery.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn last_delivery(&self) -> Option<ReservationDetails> {
        self.deliveries
            .lock()
            .expect("mock webhook lock")
            .last()
            .cloned()
    }
}

impl Default for MockWebhook {
    fn default() -> Self {
        Self::new()
    }
}

impl WebhookSink for MockWebhook {
    fn deliver(&self, details: &ReservationDetails) -> impl Future<Output = Result<()>> + Send {
        let deliveries = Arc::clone(&self.deliveries);
        let should_succeed = Arc::clone(&self.should_succeed);
        let details = details.clone();

        async move {
            let succeed = *should_succeed
                .lock()
                .map_err(|_| ReservationError::WebhookFailed {
                    message: "mock webhook lock poisoned".to_string(),
                })?;

            if !succeed {
                return Err(ReservationError::WebhookFailed {
                    message: "webhook failure injected".to_string(),
                });
            }

            deliveries
                .lock()
                .map_err(|_| ReservationError::WebhookFailed {
                    message: "mock webhook lock poisoned".to_string(),
                })?
                .push(details);

            Ok(())
        }
    }
}
