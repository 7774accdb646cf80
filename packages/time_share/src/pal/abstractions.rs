//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides monotonic clock readings.
///
/// Readings are offsets from an arbitrary per-platform origin, guaranteed
/// never to decrease and unaffected by wall-clock adjustments. Only the
/// difference between two readings from the same platform is meaningful.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current monotonic clock reading.
    fn monotonic_time(&self) -> Duration;
}
