//! Error types for data store, notifier, and webhook operations.

use thiserror::Error;

/// Result type alias for reservation operations.
pub type Result<T> = std::result::Result<T, ReservationError>;

/// Error taxonomy for the reservation system's external collaborators.
///
/// Validation problems and duplicate bookings are not errors: the reducer
/// handles them as user-facing notices. This enum covers the failures that
/// cross a process boundary, organized by the collaborator that produced
/// them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReservationError {
    // ═══════════════════════════════════════════════════════════
    // Configuration Errors
    // ═══════════════════════════════════════════════════════════

    /// A required environment variable is not set.
    #[error("Missing environment variable: {name}")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },

    // ═══════════════════════════════════════════════════════════
    // Data Store Errors
    // ═══════════════════════════════════════════════════════════

    /// The data store could not be reached at all.
    #[error("Data store unreachable: {0}")]
    StoreUnreachable(String),

    /// The data store answered with a non-success status.
    #[error("Data store rejected {collection} request ({status}): {message}")]
    StoreRejected {
        /// Collection the request targeted.
        collection: &'static str,
        /// HTTP status code returned.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// A row came back that does not decode into its record type.
    #[error("Malformed row in {collection}: {message}")]
    MalformedRow {
        /// Collection the row came from.
        collection: &'static str,
        /// Decode failure detail.
        message: String,
    },

    /// An insert that should return the stored row returned none.
    #[error("No row returned from {collection} insert")]
    MissingRow {
        /// Collection the insert targeted.
        collection: &'static str,
    },

    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════

    /// Sign-in was rejected by the auth endpoint.
    #[error("Authentication failed: {message}")]
    AuthFailed {
        /// Failure detail from the auth endpoint.
        message: String,
    },

    /// The account authenticated but is not in the administrators list.
    #[error("Account is not an administrator")]
    NotAuthorized,

    // ═══════════════════════════════════════════════════════════
    // Notification Errors
    // ═══════════════════════════════════════════════════════════

    /// The verification-code email could not be delivered.
    #[error("Code delivery failed: {message}")]
    DeliveryFailed {
        /// Failure detail from the notifier.
        message: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Webhook Errors
    // ═══════════════════════════════════════════════════════════

    /// The outbound webhook call failed. Callers treat this as
    /// best-effort: it is logged, never propagated into the workflow.
    #[error("Webhook delivery failed: {message}")]
    WebhookFailed {
        /// Failure detail from the webhook endpoint.
        message: String,
    },
}

impl ReservationError {
    /// Returns `true` if this error is a transport-level failure that a
    /// later identical request might not hit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fournil_reservation::ReservationError;
    /// assert!(ReservationError::StoreUnreachable("timeout".into()).is_transport());
    /// assert!(!ReservationError::NotAuthorized.is_transport());
    /// ```
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::StoreUnreachable(_)
                | Self::DeliveryFailed { .. }
                | Self::WebhookFailed { .. }
        )
    }

    /// Returns `true` if this error means the caller lacks access rights.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fournil_reservation::ReservationError;
    /// assert!(ReservationError::NotAuthorized.is_access_denied());
    /// assert!(
    ///     ReservationError::AuthFailed { message: "bad password".into() }.is_access_denied()
    /// );
    /// ```
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AuthFailed { .. } | Self::NotAuthorized)
    }
}
