//! # Fournil Testing
//!
//! Testing utilities and helpers for the Fournil reservation architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use fournil_testing::{ReducerTest, test_clock};
//!
//! #[test]
//! fn cart_add_increments_quantity() {
//!     ReducerTest::new(ReservationReducer::new())
//!         .with_env(test_environment())
//!         .given_state(ReservationState::default())
//!         .when_action(ReservationAction::AddToCart { product })
//!         .then_state(|state| {
//!             assert_eq!(state.cart.count(), 1);
//!         })
//!         .run();
//! }
//! ```

use chrono::{DateTime, Utc};
use fournil_core::environment::Clock;

/// Fluent reducer test harness and effect assertions
pub mod reducer_test;

/// Mock implementations of Environment traits
///
/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use fournil_testing::mocks::FixedClock;
    /// use fournil_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }
}
