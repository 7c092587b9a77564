//! Reservation environment.
//!
//! Dependency injection point for the reservation reducer: the data
//! store, the code notifier, the webhook sink, and the clock.

use std::sync::Arc;

use fournil_core::environment::Clock;

use crate::providers::{DataStore, Notifier, WebhookSink};

/// External dependencies of the reservation workflow.
///
/// # Type Parameters
///
/// - `S`: Data store
/// - `N`: Verification-code notifier
/// - `W`: Webhook sink
#[derive(Clone)]
pub struct ReservationEnvironment<S, N, W>
where
    S: DataStore,
    N: Notifier,
    W: WebhookSink,
{
    /// Data store holding products, reservations and contacts.
    pub store: S,

    /// Channel that delivers verification codes to customers.
    pub notifier: N,

    /// Best-effort sink notified after a reservation is persisted.
    pub webhook: W,

    /// Time source, swappable for deterministic tests.
    pub clock: Arc<dyn Clock>,
}

impl<S, N, W> ReservationEnvironment<S, N, W>
where
    S: DataStore,
    N: Notifier,
    W: WebhookSink,
{
    /// Create a new reservation environment.
    #[must_use]
    pub fn new(store: S, notifier: N, webhook: W, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            notifier,
            webhook,
            clock,
        }
    }
}
