//! Scheduling: drives `tick()` on a fixed period from outside the kernel.
//!
//! # Invariants
//! - At most one tick is due per scheduling decision; backlog is dropped,
//!   never replayed as a burst.
//! - The kernel never learns which scheduler is calling it.

mod step;
mod timer;
mod timings;

pub use step::FixedStep;
pub use timer::{TickTimer, TimerStats};
pub use timings::TickTimings;

pub fn crate_info() -> &'static str {
    "lifegrid-sched v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("sched"));
    }
}
