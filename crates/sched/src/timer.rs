use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lifegrid_kernel::{SharedEngine, TickOutcome};

use crate::timings::TickTimings;

const TIMING_WINDOW: usize = 64;

/// Counters kept by a running `TickTimer`.
#[derive(Debug, Clone)]
pub struct TimerStats {
    /// Ticks that committed a generation.
    pub advanced: u64,
    /// Ticks that found the engine paused.
    pub paused: u64,
    /// Deadlines missed because a tick overran the period, plus ticks the
    /// engine dropped as overlapping.
    pub skipped: u64,
    /// Durations of recent advancing ticks.
    pub timings: TickTimings,
}

impl Default for TimerStats {
    fn default() -> Self {
        Self {
            advanced: 0,
            paused: 0,
            skipped: 0,
            timings: TickTimings::new(TIMING_WINDOW),
        }
    }
}

/// Background thread calling `tick()` on a shared engine every `interval`.
///
/// Deadlines missed by a slow tick are skipped rather than caught up. The
/// thread stops on `stop()` or when the timer is dropped.
pub struct TickTimer {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    stats: Arc<Mutex<TimerStats>>,
    interval: Duration,
}

impl TickTimer {
    pub fn spawn(engine: SharedEngine, interval: Duration) -> std::io::Result<Self> {
        if interval.is_zero() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "tick interval must be positive",
            ));
        }
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let stats = Arc::new(Mutex::new(TimerStats::default()));
        let thread_stats = Arc::clone(&stats);

        let handle = std::thread::Builder::new()
            .name("life-tick".into())
            .spawn(move || {
                tracing::info!(?interval, "tick timer started");
                // `None` is a deadline past the clock's range: it never fires.
                let mut deadline = Instant::now().checked_add(interval);
                loop {
                    let signal = match deadline {
                        Some(d) => stop_rx.recv_timeout(d.saturating_duration_since(Instant::now())),
                        None => stop_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                    };
                    match signal {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    let started = Instant::now();
                    let outcome = engine.tick();
                    let took = started.elapsed();

                    deadline = deadline.and_then(|d| d.checked_add(interval));
                    let now = Instant::now();
                    let overran = deadline.is_some_and(|d| d <= now);
                    if overran {
                        deadline = now.checked_add(interval);
                    }

                    let mut stats = thread_stats.lock().unwrap_or_else(PoisonError::into_inner);
                    match outcome {
                        TickOutcome::Advanced { .. } => {
                            stats.advanced += 1;
                            stats.timings.record(took);
                        }
                        TickOutcome::Paused => stats.paused += 1,
                        TickOutcome::Skipped => stats.skipped += 1,
                    }
                    if overran {
                        stats.skipped += 1;
                        tracing::debug!(?took, "tick overran its period");
                    }
                }
                tracing::info!("tick timer stopped");
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
            stats,
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Copy of the counters as of now.
    pub fn stats(&self) -> TimerStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Signal the thread and wait for it to exit. Returns final counters.
    pub fn stop(mut self) -> TimerStats {
        self.shutdown();
        self.stats()
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("tick timer thread panicked");
            }
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_kernel::{GridStore, LifeEngine};

    fn blinker_engine() -> SharedEngine {
        let grid = GridStore::from_rows(&[".....", ".....", ".###.", ".....", "....."]).unwrap();
        SharedEngine::new(LifeEngine::new(grid))
    }

    fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
        let end = Instant::now() + timeout;
        while Instant::now() < end {
            if cond() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        cond()
    }

    #[test]
    fn zero_interval_rejected() {
        assert!(TickTimer::spawn(blinker_engine(), Duration::ZERO).is_err());
    }

    #[test]
    fn interval_beyond_clock_range_waits_for_stop() {
        let engine = blinker_engine();
        engine.set_running(true);
        let timer = TickTimer::spawn(engine.clone(), Duration::MAX).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        let stats = timer.stop();
        assert_eq!(stats.advanced + stats.paused + stats.skipped, 0);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn ticks_running_engine() {
        let engine = blinker_engine();
        engine.set_running(true);
        let timer = TickTimer::spawn(engine.clone(), Duration::from_millis(5)).unwrap();

        assert!(wait_until(Duration::from_secs(5), || engine.generation() >= 3));
        let stats = timer.stop();

        assert_eq!(stats.advanced, engine.generation());
        assert_eq!(stats.timings.len() as u64, stats.advanced.min(64));
    }

    #[test]
    fn paused_engine_is_left_alone() {
        let engine = blinker_engine();
        let before = engine.snapshot();
        let timer = TickTimer::spawn(engine.clone(), Duration::from_millis(5)).unwrap();

        assert!(wait_until(Duration::from_secs(5), || timer.stats().paused >= 3));
        let stats = timer.stop();

        assert_eq!(stats.advanced, 0);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.snapshot().grid(), before.grid());
    }

    #[test]
    fn toggle_takes_effect_on_next_tick() {
        let engine = blinker_engine();
        let timer = TickTimer::spawn(engine.clone(), Duration::from_millis(5)).unwrap();
        assert!(wait_until(Duration::from_secs(5), || timer.stats().paused >= 1));
        assert_eq!(engine.generation(), 0);

        engine.toggle_running();
        assert!(wait_until(Duration::from_secs(5), || engine.generation() >= 1));
        drop(timer);

        // After drop the thread is gone and nothing advances any more.
        let g = engine.generation();
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(engine.generation(), g);
    }

    #[test]
    fn paints_interleave_with_timer() {
        let engine = blinker_engine();
        engine.set_running(true);
        let timer = TickTimer::spawn(engine.clone(), Duration::from_millis(1)).unwrap();
        for i in 0..200 {
            engine.paint(i % 5, (i / 5) % 5, i % 2 == 0).unwrap();
        }
        timer.stop();
        assert!(engine.paint(5, 0, true).is_err());
    }
}
