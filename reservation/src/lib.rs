//! # Fournil Reservation
//!
//! Cart and reservation workflow for the Fournil pastry shop.
//!
//! The public flow is a two-step reservation: the customer fills a cart
//! and a contact form, receives a six-digit code by email, and echoes it
//! back; only then is the reservation persisted (status `pending`). An
//! email with a pending or confirmed reservation cannot start another
//! one. Admins confirm or delete reservations and manage the catalog.
//!
//! ## Architecture
//!
//! The workflow is a reducer over [`state::ReservationState`]:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! External collaborators enter through three provider traits: the
//! [`providers::DataStore`] (collections + authentication), the
//! [`providers::Notifier`] (code delivery), and the
//! [`providers::WebhookSink`] (best-effort announcement).
//!
//! ## Example: driving the workflow
//!
//! ```rust,ignore
//! use fournil_reservation::*;
//! use fournil_runtime::Store;
//!
//! let env = ReservationEnvironment::new(data_store, notifier, webhook, clock);
//! let store = Store::new(
//!     ReservationState::default(),
//!     ReservationReducer::new(),
//!     env,
//! );
//!
//! store.send(ReservationAction::AddToCart { product }).await;
//! store.send(ReservationAction::Submit { correlation_id, form }).await;
//! // ... the customer receives a code and types it back ...
//! store.send(ReservationAction::EnterCode { correlation_id, code }).await;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod environment;
pub mod error;
pub mod providers;
pub mod records;
pub mod reducer;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::ReservationAction;
pub use cart::{Cart, CartItem};
pub use environment::ReservationEnvironment;
pub use error::{ReservationError, Result};
pub use reducer::ReservationReducer;
pub use state::{Notice, PendingReservation, ReservationForm, ReservationPhase, ReservationState};
