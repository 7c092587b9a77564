//! Verification-code delivery contract.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Payload for a verification-code message.
///
/// The timestamp is pre-rendered by the caller so every delivery channel
/// shows the same wall-clock text the workflow decided on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDelivery {
    /// Six-digit verification code, rendered as text.
    pub code: String,
    /// Human-readable send time, e.g. `2025-01-01 08:00:00`.
    pub timestamp: String,
    /// Address the code is sent to.
    pub recipient_email: String,
}

/// Sends verification codes to customers.
///
/// Implementations pick the channel; the workflow only chooses the
/// template and the payload.
pub trait Notifier: Clone + Send + Sync + 'static {
    /// Deliver `payload` using the template identified by `template_id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReservationError::DeliveryFailed`] when the
    /// message could not be handed to the channel.
    fn send(
        &self,
        template_id: &str,
        payload: &CodeDelivery,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
