use std::time::Duration;

/// Rolling window of recent tick durations.
#[derive(Debug, Clone)]
pub struct TickTimings {
    samples: Vec<Duration>,
    capacity: usize,
    next: usize,
}

impl TickTimings {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.samples.len() < self.capacity {
            self.samples.push(dt);
        } else {
            self.samples[self.next] = dt;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or_default()
    }
}

impl std::fmt::Display for TickTimings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ticks={} avg={:?} min={:?} max={:?}",
            self.len(),
            self.average(),
            self.min(),
            self.max()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        let t = TickTimings::new(4);
        assert!(t.is_empty());
        assert_eq!(t.average(), Duration::ZERO);
        assert_eq!(t.max(), Duration::ZERO);
    }

    #[test]
    fn tracks_stats() {
        let mut t = TickTimings::new(3);
        t.record(Duration::from_millis(10));
        t.record(Duration::from_millis(20));
        t.record(Duration::from_millis(30));
        assert_eq!(t.len(), 3);
        assert_eq!(t.average(), Duration::from_millis(20));
        assert_eq!(t.min(), Duration::from_millis(10));
        assert_eq!(t.max(), Duration::from_millis(30));
    }

    #[test]
    fn oldest_sample_is_overwritten() {
        let mut t = TickTimings::new(2);
        t.record(Duration::from_millis(10));
        t.record(Duration::from_millis(20));
        t.record(Duration::from_millis(30));
        assert_eq!(t.len(), 2);
        assert_eq!(t.min(), Duration::from_millis(20));
        assert_eq!(t.average(), Duration::from_millis(25));
    }
}
