use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fixed-period accumulator for cooperative event loops.
///
/// Feed it frame deltas; it reports whether a tick is due. When several
/// periods have elapsed since the last tick (a slow frame, or a tick slower
/// than the period) only one tick is reported and the rest are discarded.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: Duration,
    accumulator: Duration,
    dropped: u64,
}

impl FixedStep {
    /// `interval` must be non-zero.
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "tick interval must be positive");
        Self {
            interval,
            accumulator: Duration::ZERO,
            dropped: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Account for `dt` of wall time. Returns true if a tick should run now.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.accumulator = self.accumulator.saturating_add(dt);
        if self.accumulator < self.interval {
            return false;
        }
        let due = u64::try_from(self.accumulator.as_nanos() / self.interval.as_nanos())
            .unwrap_or(u64::MAX);
        self.dropped = self.dropped.saturating_add(due - 1);
        let rest = self.accumulator.as_nanos() % self.interval.as_nanos();
        self.accumulator = Duration::new(
            (rest / NANOS_PER_SEC) as u64,
            (rest % NANOS_PER_SEC) as u32,
        );
        if due > 1 {
            tracing::trace!(coalesced = due - 1, "dropping backlog ticks");
        }
        true
    }

    /// Ticks discarded by coalescing so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Time accumulated toward the next tick.
    pub fn pending(&self) -> Duration {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_due_before_interval() {
        let mut s = FixedStep::new(Duration::from_millis(500));
        assert!(!s.advance(Duration::from_millis(200)));
        assert!(!s.advance(Duration::from_millis(200)));
        assert!(s.advance(Duration::from_millis(200)));
        assert_eq!(s.pending(), Duration::from_millis(100));
    }

    #[test]
    fn backlog_coalesces_to_one_tick() {
        let mut s = FixedStep::new(Duration::from_millis(100));
        assert!(s.advance(Duration::from_millis(350)));
        assert_eq!(s.dropped(), 2);
        assert_eq!(s.pending(), Duration::from_millis(50));
        // The dropped periods are not replayed on the next frame.
        assert!(!s.advance(Duration::from_millis(10)));
    }

    #[test]
    fn exact_interval_is_due() {
        let mut s = FixedStep::new(Duration::from_millis(16));
        assert!(s.advance(Duration::from_millis(16)));
        assert_eq!(s.pending(), Duration::ZERO);
        assert_eq!(s.dropped(), 0);
    }

    #[test]
    fn huge_interval_accumulates_without_overflow() {
        let mut s = FixedStep::new(Duration::MAX);
        assert!(!s.advance(Duration::from_secs(u64::MAX / 2)));
        assert!(s.advance(Duration::MAX));
        assert_eq!(s.pending(), Duration::ZERO);
        assert_eq!(s.dropped(), 0);
    }

    #[test]
    #[should_panic(expected = "tick interval must be positive")]
    fn zero_interval_panics() {
        FixedStep::new(Duration::ZERO);
    }
}
