//! # Fournil Core
//!
//! Core traits and types for the Fournil reservation architecture.
//!
//! This crate provides the fundamental abstractions for building
//! functional, effect-driven workflows using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use fournil_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     value: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.value += 1,
//!             CounterAction::Decrement => state.value -= 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for ReservationReducer {
    ///     type State = ReservationState;
    ///     type Action = ReservationAction;
    ///     type Environment = ReservationEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut ReservationState,
    ///         action: ReservationAction,
    ///         env: &ReservationEnvironment,
    ///     ) -> SmallVec<[Effect<ReservationAction>; 4]> {
    ///         match action {
    ///             ReservationAction::Cancel => {
    ///                 // Business logic here
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Most reducer arms return
        /// zero or one effect, so the buffer is inlined.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timers and cooldowns)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use fournil_core::environment::{Clock, SystemClock};
    ///
    /// let clock: &dyn Clock = &SystemClock;
    /// let now = clock.now();
    /// assert!(now.timestamp() > 0);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
