//! Real platform implementation backed by the operating system clock.

use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// Real monotonic clock, anchored at the moment the platform was created.
///
/// `Instant` is opaque, so readings are exposed as the elapsed time since an
/// origin captured at construction. All readings taken through the same
/// platform instance share that origin, which keeps differences between
/// readings exact.
#[derive(Debug)]
pub(crate) struct RealPlatform {
    origin: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn monotonic_time(&self) -> Duration {
        self.origin.elapsed()
    }
}
