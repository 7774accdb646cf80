//! Scoped measurement of a single action.

use std::sync::{Arc, Mutex};

use crate::ERR_POISONED_LOCK;
use crate::pal::{Platform, PlatformFacade};
use crate::session::SessionState;

/// A running measurement that stops its action when dropped.
///
/// Obtained from [`Session::measure()`](crate::Session::measure). The action
/// is stopped exactly once per span, no matter how control leaves the guarded
/// region: normal completion, early return or a panic unwinding through it.
///
/// # Examples
///
/// ```
/// use time_share::Session;
///
/// # fn main() -> Result<(), time_share::Error> {
/// let session = Session::new();
///
/// {
///     let _span = session.measure("encode")?;
///     // Perform the work being measured.
/// } // The elapsed time is recorded here.
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[must_use = "measurements are taken between creation and drop"]
pub struct ActionSpan {
    state: Arc<Mutex<SessionState>>,
    name: String,
    platform: PlatformFacade,
}

impl ActionSpan {
    pub(crate) fn new(
        state: Arc<Mutex<SessionState>>,
        name: String,
        platform: PlatformFacade,
    ) -> Self {
        Self {
            state,
            name,
            platform,
        }
    }

    /// Name of the action this span is measuring.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ActionSpan {
    fn drop(&mut self) {
        let now = self.platform.monotonic_time();

        // An Err here means the caller already stopped the action by hand
        // while the span was alive. The stop then already happened exactly
        // once, so there is nothing left to record.
        drop(
            self.state
                .lock()
                .expect(ERR_POISONED_LOCK)
                .stop_action(&self.name, now),
        );
    }
}
