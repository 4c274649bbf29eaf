use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lifegrid_common::{CellCoord, LifeError};

use crate::engine::{LifeEngine, LifeEvent, TickOutcome};
use crate::patterns::Pattern;

/// Cloneable, thread-safe handle to one `LifeEngine`.
///
/// A single mutex guards the grid, the scratch buffer and the running flag.
/// Ticks hold it for their whole computation and paints for their single
/// write, so a paint is observed by all of a tick's neighbour counts or by
/// none of them. A tick requested while another is still running is dropped
/// and reported as `TickOutcome::Skipped`.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    engine: Mutex<LifeEngine>,
    ticking: AtomicBool,
}

impl SharedEngine {
    pub fn new(engine: LifeEngine) -> Self {
        Self {
            inner: Arc::new(Shared {
                engine: Mutex::new(engine),
                ticking: AtomicBool::new(false),
            }),
        }
    }

    /// Lock the engine. A panic in another holder does not leave the grid
    /// half-written (the next generation is only published by swap), so a
    /// poisoned lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, LifeEngine> {
        self.inner
            .engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<T>(&self, f: impl FnOnce(&mut LifeEngine) -> T) -> T {
        f(&mut *self.lock())
    }

    /// Advance one generation if running. Never overlaps another tick.
    pub fn tick(&self) -> TickOutcome {
        if self.inner.ticking.swap(true, Ordering::Acquire) {
            tracing::debug!("tick already in progress, dropping request");
            return TickOutcome::Skipped;
        }
        let outcome = self.lock().tick();
        self.inner.ticking.store(false, Ordering::Release);
        outcome
    }

    pub fn paint(&self, x: i32, y: i32, alive: bool) -> Result<(), LifeError> {
        self.lock().paint(x, y, alive)
    }

    pub fn stamp(&self, pattern: &Pattern, origin: CellCoord) -> Result<usize, LifeError> {
        self.lock().stamp(pattern, origin)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<bool, LifeError> {
        self.lock().get(x, y)
    }

    pub fn toggle_running(&self) -> bool {
        self.lock().toggle_running()
    }

    pub fn set_running(&self, running: bool) {
        self.lock().set_running(running);
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    pub fn drain_events(&self) -> Vec<LifeEvent> {
        self.lock().drain_events()
    }

    /// Copy of the engine as of now; a consistent, fully committed generation.
    pub fn snapshot(&self) -> LifeEngine {
        self.lock().clone()
    }
}
