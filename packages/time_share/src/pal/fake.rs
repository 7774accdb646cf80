//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation allows tests to control the monotonic clock instead of
/// relying on the operating system. Multiple clones of the same `FakePlatform`
/// share the same underlying time value, allowing tests to advance time after
/// the platform has been handed to a session, simulating time progression
/// during a measurement.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    monotonic_time: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    /// Creates a new fake platform with the clock at zero.
    pub(crate) fn new() -> Self {
        Self {
            monotonic_time: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Sets the monotonic clock reading.
    ///
    /// This affects all clones of this platform.
    pub(crate) fn set_monotonic_time(&self, time: Duration) {
        *self
            .monotonic_time
            .lock()
            .expect("FakePlatform state lock should not be poisoned") = time;
    }

    /// Advances the monotonic clock by the given amount.
    ///
    /// This affects all clones of this platform.
    pub(crate) fn advance(&self, by: Duration) {
        let mut time = self
            .monotonic_time
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        *time = time
            .checked_add(by)
            .expect("advancing the fake clock overflows Duration - this indicates a broken test");
    }
}

impl Platform for FakePlatform {
    fn monotonic_time(&self) -> Duration {
        *self
            .monotonic_time
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}
