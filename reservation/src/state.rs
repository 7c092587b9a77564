//! Reservation workflow state.
//!
//! The workflow is a finite state machine held in [`ReservationState`].
//! Phases that need data carry it: `AwaitingVerification` owns the
//! [`PendingReservation`] snapshot, so the data cannot exist outside the
//! one phase that uses it.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};

// ═══════════════════════════════════════════════════════════════════════
// Phases
// ═══════════════════════════════════════════════════════════════════════

/// Where the workflow currently stands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ReservationPhase {
    /// Browsing; nothing submitted.
    #[default]
    Idle,

    /// A network step is in flight: either the duplicate check after
    /// submission or the persistence step after code verification.
    Submitting,

    /// A verification code was emailed; waiting for the customer to
    /// type it back.
    AwaitingVerification {
        /// Snapshot to persist once the code matches.
        pending: PendingReservation,
    },

    /// The reservation is persisted.
    Success,

    /// A step failed; the cart is untouched so the customer can retry.
    Error {
        /// User-facing description of what went wrong.
        message: String,
    },
}

impl ReservationPhase {
    /// Short phase name for log fields.
    ///
    /// Deliberately omits phase payloads so verification codes never
    /// reach the logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::AwaitingVerification { .. } => "awaiting_verification",
            Self::Success => "success",
            Self::Error { .. } => "error",
        }
    }
}

/// Everything needed to persist a reservation once its code is verified.
///
/// Held only in memory between code issuance and verification. If the
/// session ends first, the snapshot is lost and no server-side record
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReservation {
    /// Customer's full name.
    pub customer_name: String,
    /// Email the code was sent to.
    pub customer_email: String,
    /// Contact phone number.
    pub customer_phone: String,
    /// Delivery address, when the customer gave one.
    pub address: Option<String>,
    /// Cart lines frozen at submission time.
    pub cart: Vec<CartItem>,
    /// The six-digit code the customer must echo back.
    pub code: String,
}

// ═══════════════════════════════════════════════════════════════════════
// Notices
// ═══════════════════════════════════════════════════════════════════════

/// A message shown to the customer without leaving the current phase
/// (or after returning to [`ReservationPhase::Idle`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Submission attempted with an empty cart.
    EmptyCart,
    /// A required contact field is blank.
    MissingField {
        /// Name of the blank field.
        field: String,
    },
    /// The email address does not look like one.
    InvalidEmail,
    /// This email already has a reservation awaiting confirmation.
    DuplicatePending,
    /// This email already has a confirmed reservation.
    AlreadyReserved,
    /// The entered verification code does not match the issued one.
    CodeMismatch,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCart => write!(f, "Your cart is empty."),
            Self::MissingField { field } => {
                write!(f, "Please fill in the {field} field.")
            }
            Self::InvalidEmail => write!(f, "Please enter a valid email address."),
            Self::DuplicatePending => write!(
                f,
                "A reservation is already awaiting confirmation for this email address."
            ),
            Self::AlreadyReserved => {
                write!(f, "A reservation already exists for this email address.")
            }
            Self::CodeMismatch => {
                write!(f, "The code you entered does not match. Please try again.")
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Contact form
// ═══════════════════════════════════════════════════════════════════════

/// Contact details the customer submits with the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationForm {
    /// Customer's full name.
    pub name: String,
    /// Email the verification code goes to.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Delivery address; optional.
    pub address: Option<String>,
}

impl ReservationForm {
    /// Check the form before any network call.
    ///
    /// Name, email and phone must be non-blank; the email must at least
    /// contain an `@`. The address is optional and never checked.
    ///
    /// # Errors
    ///
    /// Returns the [`Notice`] to show when a field is missing or the
    /// email is malformed.
    pub fn validate(&self) -> Result<(), Notice> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(Notice::MissingField {
                    field: field.to_string(),
                });
            }
        }

        if !self.email.contains('@') {
            return Err(Notice::InvalidEmail);
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Root state
// ═══════════════════════════════════════════════════════════════════════

/// Complete state of the cart and reservation workflow.
///
/// # Examples
///
/// ```
/// use fournil_reservation::state::{ReservationPhase, ReservationState};
///
/// let state = ReservationState::default();
/// assert_eq!(state.phase, ReservationPhase::Idle);
/// assert!(state.cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationState {
    /// The customer's cart.
    pub cart: Cart,

    /// Current workflow phase.
    pub phase: ReservationPhase,

    /// Message currently shown to the customer, if any.
    pub notice: Option<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ReservationForm {
        ReservationForm {
            name: "Marie Dupont".to_string(),
            email: "marie@example.com".to_string(),
            phone: "+33612345678".to_string(),
            address: None,
        }
    }

    #[test]
    fn default_state_is_idle_with_empty_cart() {
        let state = ReservationState::default();
        assert_eq!(state.phase, ReservationPhase::Idle);
        assert!(state.cart.is_empty());
        assert!(state.notice.is_none());
    }

    #[test]
    fn complete_form_validates() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn address_is_optional() {
        let mut f = form();
        f.address = Some("12 rue des Lilas".to_string());
        assert_eq!(f.validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_reported_by_name() {
        let mut f = form();
        f.phone = "   ".to_string();
        assert_eq!(
            f.validate(),
            Err(Notice::MissingField {
                field: "phone".to_string()
            })
        );
    }

    #[test]
    fn email_must_contain_an_at_sign() {
        let mut f = form();
        f.email = "marie.example.com".to_string();
        assert_eq!(f.validate(), Err(Notice::InvalidEmail));
    }

    #[test]
    fn duplicate_notices_render_distinct_messages() {
        assert_ne!(
            Notice::DuplicatePending.to_string(),
            Notice::AlreadyReserved.to_string()
        );
    }

    #[test]
    fn phase_names_never_include_payloads() {
        let phase = ReservationPhase::AwaitingVerification {
            pending: PendingReservation {
                customer_name: "Marie".to_string(),
                customer_email: "marie@example.com".to_string(),
                customer_phone: "+33612345678".to_string(),
                address: None,
                cart: Vec::new(),
                code: "123456".to_string(),
            },
        };
        assert_eq!(phase.name(), "awaiting_verification");
    }
}
