//! Time abstraction for the simulator, allowing for mockable clocks in testing.
//!
//! Advisor decisions carry a human-readable capture time; routing it through
//! [`Clock`] keeps `decide()` deterministic under test.

use std::fmt::Debug;
use std::time::Instant;

/// A trait abstracting the concept of "now" to allow for time mocking in tests.
pub trait Clock: Send + Sync + Debug {
    /// Current `Instant`.
    fn now(&self) -> Instant;

    /// Human-readable local capture time, e.g. `14:03:57`.
    fn timestamp(&self) -> String;
}

/// The default system clock implementation using `std::time::Instant` and
/// the local wall clock for display timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn timestamp(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

/// Test utilities for mocking time.
pub mod mock_clock {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// A mock clock that allows for manual control over the current time
    /// and the displayed timestamp in tests.
    #[derive(Debug)]
    pub struct MockClock {
        current_time: Mutex<Instant>,
        timestamp_label: Mutex<String>,
    }

    impl MockClock {
        /// Creates a new `MockClock` starting at the given `start_time`.
        pub fn new(start_time: Instant) -> Self {
            Self {
                current_time: Mutex::new(start_time),
                timestamp_label: Mutex::new(String::from("00:00:00")),
            }
        }

        /// Advances the mock clock's current time by the specified duration.
        pub fn advance(&self, duration: Duration) {
            let mut current = self.current_time.lock().unwrap();
            *current += duration;
        }

        /// Sets the mock clock's current time to a specific instant.
        pub fn set_time(&self, new_time: Instant) {
            let mut current = self.current_time.lock().unwrap();
            *current = new_time;
        }

        /// Sets the label returned by [`Clock::timestamp`].
        pub fn set_timestamp_label(&self, label: impl Into<String>) {
            let mut current = self.timestamp_label.lock().unwrap();
            *current = label.into();
        }
    }

    impl Default for MockClock {
        fn default() -> Self {
            Self::new(Instant::now())
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            *self.current_time.lock().unwrap()
        }

        fn timestamp(&self) -> String {
            self.timestamp_label.lock().unwrap().clone()
        }
    }

}
