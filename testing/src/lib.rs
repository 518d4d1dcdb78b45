//! # Folio Testing
//!
//! Testing utilities and helpers for the Folio viewer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent given/when/then harness for pure reducers
//! - Assertion helpers for effect vectors
//!
//! ## Example
//!
//! ```ignore
//! use folio_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(ViewerReducer::new())
//!     .with_env(test_environment())
//!     .given_state(ViewerState::default())
//!     .when_action(ViewerAction::CloseRequested)
//!     .then_state(|s| assert_eq!(s.lifecycle, Lifecycle::Closing))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use folio_core::environment::Clock;

/// Fluent reducer test harness
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_testing::mocks::FixedClock;
    /// use folio_core::environment::Clock;
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
