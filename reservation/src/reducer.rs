//! Reservation workflow reducer.
//!
//! Drives the cart and the two-step reservation flow against the data
//! store and the notifier.
//!
//! # Flow
//!
//! 1. Customer submits the contact form with a non-empty cart
//! 2. Prior reservations for the email are loaded (duplicate check)
//! 3. A six-digit code is generated and emailed to the customer
//! 4. Customer echoes the code back
//! 5. The reservation and its item rows are persisted with status `pending`
//! 6. The joined details are announced over the webhook, best effort
//! 7. The confirmation auto-closes after a short pause
//!
//! # Security
//!
//! - Codes are uniform six-digit numbers
//! - Code comparison is constant time (timing attack prevention)
//! - An email with a pending or confirmed reservation is rejected before
//!   any code is generated or sent
//!
//! Verification attempts are not limited: the snapshot only leaves memory
//! when the code matches or the customer cancels.

use crate::actions::ReservationAction;
use crate::config::WorkflowConfig;
use crate::environment::ReservationEnvironment;
use crate::providers::{CodeDelivery, DataStore, Filter, Notifier, WebhookSink};
use crate::records::{
    NewReservation, Reservation, ReservationDetails, ReservationItem, ReservationStatus,
};
use crate::state::{Notice, PendingReservation, ReservationPhase, ReservationState};
use fournil_core::effect::Effect;
use fournil_core::reducer::Reducer;
use fournil_core::{SmallVec, smallvec};

/// Reservation workflow reducer.
///
/// Handles cart edits and the submit → verify → persist flow.
#[derive(Debug, Clone)]
pub struct ReservationReducer<S, N, W> {
    /// Template and timing knobs.
    config: WorkflowConfig,
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(S, N, W)>,
}

impl<S, N, W> ReservationReducer<S, N, W> {
    /// Create a reducer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorkflowConfig::new())
    }

    /// Create a reducer with a custom configuration.
    #[must_use]
    pub const fn with_config(config: WorkflowConfig) -> Self {
        Self {
            config,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Generate a six-digit verification code.
    ///
    /// Uniform over `100000..=999999`, so the code always renders as six
    /// digits without padding.
    fn generate_code(&self) -> String {
        use rand::Rng;

        rand::thread_rng().gen_range(100_000..1_000_000).to_string()
    }
}

impl<S, N, W> Default for ReservationReducer<S, N, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N, W> Reducer for ReservationReducer<S, N, W>
where
    S: DataStore,
    N: Notifier,
    W: WebhookSink,
{
    type State = ReservationState;
    type Action = ReservationAction;
    type Environment = ReservationEnvironment<S, N, W>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Cart edits: allowed in any phase
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::AddToCart { product } => {
                state.cart.add(&product);
                smallvec![Effect::None]
            }

            ReservationAction::AdjustQuantity { product_id, delta } => {
                state.cart.adjust_quantity(product_id, delta);
                smallvec![Effect::None]
            }

            ReservationAction::RemoveFromCart { product_id } => {
                state.cart.remove(product_id);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Submit: validate, then load prior reservations for the email
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::Submit {
                correlation_id,
                form,
            } => {
                if !matches!(
                    state.phase,
                    ReservationPhase::Idle | ReservationPhase::Error { .. }
                ) {
                    tracing::warn!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "Submit ignored outside idle"
                    );
                    return smallvec![Effect::None];
                }

                // Validation happens before any network call
                if state.cart.is_empty() {
                    state.notice = Some(Notice::EmptyCart);
                    return smallvec![Effect::None];
                }

                if let Err(notice) = form.validate() {
                    state.notice = Some(notice);
                    return smallvec![Effect::None];
                }

                state.notice = None;
                state.phase = ReservationPhase::Submitting;

                let store = env.store.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let filter = Filter::new().eq("customer_email", form.email.clone());

                    match store.select::<Reservation>(filter, None).await {
                        Ok(existing) => Some(ReservationAction::PriorReservationsLoaded {
                            correlation_id,
                            form,
                            existing,
                        }),
                        Err(e) => Some(ReservationAction::SubmitFailed {
                            correlation_id,
                            reason: e.to_string(),
                        }),
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PriorReservationsLoaded: apply the duplicate policy or
            // issue a verification code
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::PriorReservationsLoaded {
                correlation_id,
                form,
                existing,
            } => {
                if state.phase != ReservationPhase::Submitting {
                    tracing::warn!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "stale duplicate-check result ignored"
                    );
                    return smallvec![Effect::None];
                }

                // Pending is checked first so its message wins when both exist
                if existing
                    .iter()
                    .any(|r| r.status == ReservationStatus::Pending)
                {
                    state.phase = ReservationPhase::Idle;
                    state.notice = Some(Notice::DuplicatePending);
                    return smallvec![Effect::None];
                }

                if existing
                    .iter()
                    .any(|r| r.status == ReservationStatus::Confirmed)
                {
                    state.phase = ReservationPhase::Idle;
                    state.notice = Some(Notice::AlreadyReserved);
                    return smallvec![Effect::None];
                }

                // Fresh email: freeze the cart and issue a code
                let code = self.generate_code();
                let recipient = form.email.clone();

                let pending = PendingReservation {
                    customer_name: form.name,
                    customer_email: form.email,
                    customer_phone: form.phone,
                    address: form.address,
                    cart: state.cart.items().to_vec(),
                    code: code.clone(),
                };

                state.phase = ReservationPhase::AwaitingVerification { pending };

                let delivery = CodeDelivery {
                    code,
                    timestamp: env.clock.now().format("%Y-%m-%d %H:%M:%S").to_string(),
                    recipient_email: recipient,
                };

                let notifier = env.notifier.clone();
                let template_id = self.config.template_id.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match notifier.send(&template_id, &delivery).await {
                        Ok(()) => Some(ReservationAction::CodeSent { correlation_id }),
                        Err(e) => Some(ReservationAction::CodeSendFailed {
                            correlation_id,
                            reason: e.to_string(),
                        }),
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // SubmitFailed: duplicate check could not run
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::SubmitFailed {
                correlation_id,
                reason,
            } => {
                if state.phase != ReservationPhase::Submitting {
                    tracing::warn!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "stale submit failure ignored"
                    );
                    return smallvec![Effect::None];
                }

                tracing::error!(%correlation_id, reason = %reason, "duplicate check failed");
                state.phase = ReservationPhase::Error { message: reason };
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // CodeSent: confirmation event (no-op)
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::CodeSent { correlation_id } => {
                tracing::info!(%correlation_id, "verification code delivered");
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // CodeSendFailed: the code never reached the customer
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::CodeSendFailed {
                correlation_id,
                reason,
            } => {
                if !matches!(state.phase, ReservationPhase::AwaitingVerification { .. }) {
                    tracing::warn!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "stale code-send failure ignored"
                    );
                    return smallvec![Effect::None];
                }

                tracing::error!(%correlation_id, reason = %reason, "code delivery failed");
                state.phase = ReservationPhase::Error { message: reason };
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // EnterCode: verify, then persist the snapshot
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::EnterCode {
                correlation_id,
                code,
            } => {
                let ReservationPhase::AwaitingVerification { ref pending } = state.phase else {
                    tracing::warn!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "EnterCode outside awaiting_verification"
                    );
                    return smallvec![Effect::None];
                };

                // Constant-time comparison (timing attack prevention)
                if !constant_time_eq::constant_time_eq(
                    code.as_bytes(),
                    pending.code.as_bytes(),
                ) {
                    tracing::warn!(%correlation_id, "verification code mismatch");
                    state.notice = Some(Notice::CodeMismatch);
                    return smallvec![Effect::None];
                }

                let pending = pending.clone();
                state.notice = None;
                state.phase = ReservationPhase::Submitting;

                let store = env.store.clone();
                let webhook = env.webhook.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    // 1. Insert the reservation row with status pending
                    let new_row = NewReservation {
                        customer_name: pending.customer_name,
                        customer_email: pending.customer_email,
                        customer_phone: pending.customer_phone,
                        address: pending.address,
                        status: ReservationStatus::Pending,
                    };

                    let inserted: Vec<Reservation> = match store.insert(&[new_row]).await {
                        Ok(rows) => rows,
                        Err(e) => {
                            return Some(ReservationAction::PersistFailed {
                                correlation_id,
                                reason: e.to_string(),
                            });
                        }
                    };

                    let Some(reservation) = inserted.into_iter().next() else {
                        return Some(ReservationAction::PersistFailed {
                            correlation_id,
                            reason: "insert returned no reservation row".to_string(),
                        });
                    };

                    // 2. Insert one item row per cart line. The reservation
                    // row is not rolled back if this fails; the admin
                    // console surfaces the gap.
                    let items: Vec<ReservationItem> = pending
                        .cart
                        .iter()
                        .map(|line| ReservationItem {
                            reservation_id: reservation.id,
                            product_id: line.product_id,
                            quantity: line.quantity,
                            unit_price: line.unit_price,
                        })
                        .collect();

                    if let Err(e) = store.insert::<_, ReservationItem>(&items).await {
                        return Some(ReservationAction::PersistFailed {
                            correlation_id,
                            reason: e.to_string(),
                        });
                    }

                    // 3. Announce over the webhook, best effort
                    let details_filter = Filter::new().eq("id", reservation.id.0);
                    match store
                        .select::<ReservationDetails>(details_filter, None)
                        .await
                    {
                        Ok(details) => {
                            if let Some(details) = details.first() {
                                if let Err(e) = webhook.deliver(details).await {
                                    tracing::warn!(
                                        %correlation_id,
                                        error = %e,
                                        "reservation webhook delivery failed"
                                    );
                                }
                            } else {
                                tracing::warn!(
                                    %correlation_id,
                                    "reservation details view returned no row"
                                );
                            }
                        }
                        Err(e) => {
                            tracing::warn!(
                                %correlation_id,
                                error = %e,
                                "reservation details lookup failed"
                            );
                        }
                    }

                    Some(ReservationAction::ReservationPersisted {
                        correlation_id,
                        reservation_id: reservation.id,
                    })
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // ReservationPersisted: clear the cart, show the confirmation
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::ReservationPersisted {
                correlation_id,
                reservation_id,
            } => {
                if state.phase != ReservationPhase::Submitting {
                    tracing::warn!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "stale persistence result ignored"
                    );
                    return smallvec![Effect::None];
                }

                tracing::info!(
                    %correlation_id,
                    reservation_id = %reservation_id.0,
                    "reservation persisted"
                );

                state.cart.clear();
                state.phase = ReservationPhase::Success;

                // Auto-close the confirmation after a short pause
                smallvec![Effect::Delay {
                    duration: self.config.success_dismiss_after,
                    action: Box::new(ReservationAction::Dismissed { correlation_id }),
                }]
            }

            // ═══════════════════════════════════════════════════════════════
            // PersistFailed: keep the cart so the customer can retry
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::PersistFailed {
                correlation_id,
                reason,
            } => {
                if state.phase != ReservationPhase::Submitting {
                    tracing::warn!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "stale persistence failure ignored"
                    );
                    return smallvec![Effect::None];
                }

                tracing::error!(%correlation_id, reason = %reason, "reservation persistence failed");
                state.phase = ReservationPhase::Error { message: reason };
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Cancel: back to browsing, cart kept
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::Cancel => {
                state.phase = ReservationPhase::Idle;
                state.notice = None;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Dismissed: close the success confirmation
            // ═══════════════════════════════════════════════════════════════
            ReservationAction::Dismissed { correlation_id } => {
                if state.phase != ReservationPhase::Success {
                    tracing::debug!(
                        %correlation_id,
                        phase = state.phase.name(),
                        "dismiss ignored outside success"
                    );
                    return smallvec![Effect::None];
                }

                state.phase = ReservationPhase::Idle;
                smallvec![Effect::None]
            }
        }
    }
}
