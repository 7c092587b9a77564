//! Mock provider implementations for testing.
//!
//! In-memory implementations of the provider traits, with failure
//! switches so tests can exercise outage paths deterministically.

pub mod notifier;
pub mod store;
pub mod webhook;

pub use notifier::MockNotifier;
pub use store::MockDataStore;
pub use webhook::MockWebhook;
