//! Provider traits and production implementations.
//!
//! Providers are the workflow's only doors to the outside world: the data
//! store, the verification-code notifier, and the reservation webhook.
//! Each is a trait so tests can substitute deterministic mocks, with one
//! production implementation per trait.

pub mod emailjs;
pub mod notifier;
pub mod store;
pub mod supabase;
pub mod webhook;

pub use emailjs::EmailJsNotifier;
pub use notifier::{CodeDelivery, Notifier};
pub use store::{DataStore, Filter, OrderBy, Record, Session};
pub use supabase::SupabaseStore;
pub use webhook::{HttpWebhook, WebhookSink};
