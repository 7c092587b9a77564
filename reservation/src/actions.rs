//! Reservation actions.
//!
//! Commands carry user intent (add to cart, submit, enter code); events
//! carry the results of async operations (prior reservations loaded, code
//! sent, reservation persisted). Both flow through the same reducer.

use serde::{Deserialize, Serialize};

use crate::records::{Product, ProductId, Reservation, ReservationId};
use crate::state::ReservationForm;

/// Reservation action.
///
/// The only way to drive the cart and the reservation workflow. Events
/// carry the `correlation_id` of the submission that spawned them so the
/// reducer can drop results that arrive after the customer has moved on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReservationAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Cart
    // ═══════════════════════════════════════════════════════════════════════
    /// Add one unit of a product to the cart.
    AddToCart {
        /// Product to add; name and price are snapshotted into the line.
        product: Product,
    },

    /// Adjust a cart line's quantity; the line is removed when the
    /// quantity would drop to zero or below.
    AdjustQuantity {
        /// Product whose line to adjust.
        product_id: ProductId,

        /// Signed quantity change, usually ±1.
        delta: i32,
    },

    /// Remove a cart line regardless of quantity.
    RemoveFromCart {
        /// Product whose line to remove.
        product_id: ProductId,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Submission and duplicate check
    // ═══════════════════════════════════════════════════════════════════════
    /// Submit the contact form together with the current cart.
    ///
    /// # Flow
    ///
    /// 1. Reducer validates cart and form
    /// 2. Transitions to `Submitting`
    /// 3. Queries prior reservations for the email
    /// 4. Feeds back [`Self::PriorReservationsLoaded`] or [`Self::SubmitFailed`]
    Submit {
        /// Correlation ID for request tracing.
        correlation_id: uuid::Uuid,

        /// Contact details entered by the customer.
        form: ReservationForm,
    },

    /// Prior reservations for the submitted email were loaded.
    PriorReservationsLoaded {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,

        /// The form as submitted, echoed through the effect.
        form: ReservationForm,

        /// Every existing reservation row for this email.
        existing: Vec<Reservation>,
    },

    /// The duplicate-check query failed.
    SubmitFailed {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,

        /// What went wrong, for the error phase.
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Code delivery and verification
    // ═══════════════════════════════════════════════════════════════════════
    /// The verification code was handed to the notifier.
    CodeSent {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,
    },

    /// The notifier could not deliver the verification code.
    CodeSendFailed {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,

        /// What went wrong, for the error phase.
        reason: String,
    },

    /// The customer typed a verification code.
    ///
    /// # Flow
    ///
    /// 1. Reducer compares against the issued code in constant time
    /// 2. Mismatch: show a notice, stay in `AwaitingVerification`
    /// 3. Match: transition to `Submitting` and persist the reservation
    EnterCode {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,

        /// The code as typed.
        code: String,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Persistence
    // ═══════════════════════════════════════════════════════════════════════
    /// The reservation and its items were written to the store.
    ReservationPersisted {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,

        /// Identifier of the new reservation row.
        reservation_id: ReservationId,
    },

    /// Writing the reservation (or its items) failed.
    PersistFailed {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,

        /// What went wrong, for the error phase.
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Closure
    // ═══════════════════════════════════════════════════════════════════════
    /// Abandon the in-flight submission and return to browsing.
    ///
    /// Discards any pending verification; the cart is kept.
    Cancel,

    /// Auto-close the success confirmation.
    Dismissed {
        /// Correlation ID of the originating submission.
        correlation_id: uuid::Uuid,
    },
}
