use std::time::Duration;

/// Accumulated totals for one action across all of its completed cycles.
#[derive(Clone, Debug, Default)]
pub(crate) struct ActionMetrics {
    pub(crate) total_duration: Duration,
    pub(crate) count: u64,
}

impl ActionMetrics {
    /// Adds one completed start/stop cycle of the given duration to the totals.
    ///
    /// Totals only ever grow; there is no way to remove a recorded cycle.
    pub(crate) fn record(&mut self, elapsed: Duration) {
        self.total_duration = self.total_duration.checked_add(elapsed).expect(
            "duration accumulation overflows Duration - this indicates an unrealistic scenario",
        );

        self.count = self
            .count
            .checked_add(1)
            .expect("cycle count overflows u64 - this indicates an unrealistic scenario");
    }
}
