//! Facade over the real and fake platform implementations.

use std::sync::Arc;
use std::time::Duration;

use crate::pal::abstractions::Platform;
#[cfg(test)]
use crate::pal::fake::FakePlatform;
use crate::pal::real::RealPlatform;

/// Dispatches platform calls to either the real clock or a test-controlled
/// fake.
#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    Real(Arc<RealPlatform>),

    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    /// Creates a facade over the real operating system clock.
    pub(crate) fn real() -> Self {
        Self::Real(Arc::new(RealPlatform::new()))
    }

    /// Creates a facade over a fake clock controlled by tests.
    #[cfg(test)]
    pub(crate) fn fake(platform: FakePlatform) -> Self {
        Self::Fake(platform)
    }
}

impl Platform for PlatformFacade {
    fn monotonic_time(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.monotonic_time(),
            #[cfg(test)]
            Self::Fake(platform) => platform.monotonic_time(),
        }
    }
}
