// A poisoned lock means another thread panicked mid-measurement, so the recorded
// timings can no longer be trusted and we panic rather than report bad data.
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - another thread \
    panicked while updating session state, so the recorded timings can no longer be trusted";
