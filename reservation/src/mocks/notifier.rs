//! Mock verification-code notifier for testing.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::{ReservationError, Result};
use crate::providers::notifier::{CodeDelivery, Notifier};

/// Notifier that records deliveries instead of sending them.
#[derive(Debug, Clone)]
pub struct MockNotifier {
    deliveries: Arc<Mutex<Vec<(String, CodeDelivery)>>>,
    should_succeed: Arc<Mutex<bool>>,
}

impl MockNotifier {
    /// Create a notifier that accepts every delivery.
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
        *self.should_succeed.lock().expect("mock notifier lock") = succeed;
    }

    /// Number of deliveries accepted so far.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.deliveries.lock().expect("mock notifier lock").len()
    }

    /// The most recent accepted delivery, as `(template_id, payload)`.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn last_delivery(&self) -> Option<(String, CodeDelivery)> {
        self.deliveries
            .lock()
            .expect("mock notifier lock")
            .last()
            .cloned()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    fn send(
        &self,
        template_id: &str,
        payload: &CodeDelivery,
    ) -> impl Future<Output = Result<()>> + Send {
        let deliveries = Arc::clone(&self.deliveries);
        let should_succeed = Arc::clone(&self.should_succeed);
        let template_id = template_id.to_string();
        let payload = payload.clone();

        async move {
            let succeed = *should_succeed
                .lock()
                .map_err(|_| ReservationError::DeliveryFailed {
                    message: "mock notifier lock poisoned".to_string(),
                })?;

            if !succeed {
                return Err(ReservationError::DeliveryFailed {
                    message: "delivery failure injected".to_string(),
                });
            }

            deliveries
                .lock()
                .map_err(|_| ReservationError::DeliveryFailed {
                    message: "mock notifier lock poisoned".to_string(),
                })?
                .push((template_id, payload));

            Ok(())
        }
    }
}
