use lifegrid_common::{CellCoord, LifeConfig, LifeError};
use serde::{Deserialize, Serialize};

use crate::grid::GridStore;
use crate::patterns::Pattern;
use crate::rule;

/// What caused a cell to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCause {
    Paint,
    Tick,
}

/// An event record appended for every observable state change.
///
/// This is the change-notification channel: renderers drain the log and
/// refresh only the cells named in `CellChanged`. When the log outgrows its
/// capacity it is collapsed into a single `Resync`, after which a consumer
/// must re-read the whole grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifeEvent {
    /// A cell's value flipped.
    CellChanged {
        cell: CellCoord,
        alive: bool,
        cause: ChangeCause,
    },
    /// A generation was committed.
    Advanced {
        generation: u64,
        births: usize,
        deaths: usize,
    },
    /// The running flag was changed.
    RunningChanged { running: bool },
    /// Earlier undrained events were discarded. Nothing more is recorded
    /// until the log is drained.
    Resync,
}

/// Smallest event capacity an engine gets by default.
pub const MIN_EVENT_CAPACITY: usize = 1024;

/// Result of a tick request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Running flag was off; nothing was computed.
    Paused,
    /// Another tick was still in progress; this one was dropped.
    Skipped,
    /// A new generation was committed.
    Advanced {
        generation: u64,
        births: usize,
        deaths: usize,
    },
}

impl TickOutcome {
    pub fn advanced(&self) -> bool {
        matches!(self, Self::Advanced { .. })
    }
}

/// Game of Life engine: owns the grid, the running flag and the event log.
///
/// Paints write straight into the current generation and are visible at once;
/// ticks compute the whole next generation from the current one and commit
/// it in one swap. Holding `&mut self` for both makes every paint land either
/// entirely before or entirely after a tick.
#[derive(Debug, Clone)]
pub struct LifeEngine {
    grid: GridStore,
    running: bool,
    generation: u64,
    event_log: Vec<LifeEvent>,
    event_capacity: usize,
    overflowed: bool,
}

impl LifeEngine {
    /// Wrap an existing grid. The engine starts paused at generation 0.
    ///
    /// The event log holds at most one entry per cell (and never fewer than
    /// `MIN_EVENT_CAPACITY`) before it collapses into `Resync`.
    pub fn new(grid: GridStore) -> Self {
        let cells = grid.size().saturating_mul(grid.size());
        Self {
            grid,
            running: false,
            generation: 0,
            event_log: Vec::new(),
            event_capacity: cells.max(MIN_EVENT_CAPACITY),
            overflowed: false,
        }
    }

    /// Validate the configuration and build a randomly seeded grid from it.
    pub fn from_config(config: &LifeConfig) -> Result<Self, LifeError> {
        config.validate()?;
        let grid = GridStore::initialize(
            config.grid_side()?,
            config.initial_alive_probability,
            config.seed,
        )?;
        Ok(Self::new(grid))
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Generations committed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn get(&self, x: i32, y: i32) -> Result<bool, LifeError> {
        self.grid.get(x, y)
    }

    /// Flip the running flag. Returns the new value.
    pub fn toggle_running(&mut self) -> bool {
        self.set_running(!self.running);
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running == running {
            return;
        }
        self.running = running;
        tracing::debug!(running, generation = self.generation, "running flag changed");
        self.record(LifeEvent::RunningChanged { running });
    }

    /// Set one cell, bypassing the rule. Does not touch the running flag.
    ///
    /// An off-grid coordinate is refused with `OutOfBounds` and nothing
    /// changes.
    pub fn paint(&mut self, x: i32, y: i32, alive: bool) -> Result<(), LifeError> {
        let before = match self.grid.get(x, y) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(x, y, alive, "paint rejected: {e}");
                return Err(e);
            }
        };
        self.grid.set(x, y, alive)?;
        if before != alive {
            self.record(LifeEvent::CellChanged {
                cell: CellCoord::new(x, y),
                alive,
                cause: ChangeCause::Paint,
            });
        }
        tracing::trace!(x, y, alive, "paint");
        Ok(())
    }

    /// Paint every cell of `pattern` alive with its bounding box at `origin`.
    ///
    /// All cells are checked first; if any falls off the grid nothing is
    /// written. Returns the number of cells painted.
    pub fn stamp(&mut self, pattern: &Pattern, origin: CellCoord) -> Result<usize, LifeError> {
        if let Some(bad) = pattern
            .cells_at(origin)
            .find(|c| !self.grid.contains(c.x, c.y))
        {
            return Err(LifeError::OutOfBounds {
                x: bad.x,
                y: bad.y,
                size: self.grid.size(),
            });
        }
        let mut painted = 0;
        for c in pattern.cells_at(origin) {
            self.paint(c.x, c.y, true)?;
            painted += 1;
        }
        tracing::debug!(pattern = pattern.name, %origin, "pattern stamped");
        Ok(painted)
    }

    /// Advance one generation if the running flag is set.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Paused;
        }
        self.step()
    }

    /// Advance one generation regardless of the running flag.
    ///
    /// Every cell's neighbour count is read from the current generation, the
    /// result goes to the scratch buffer, and the buffers are swapped once at
    /// the end.
    pub fn step(&mut self) -> TickOutcome {
        let next_generation = self.generation + 1;
        let _span = tracing::debug_span!("tick", generation = next_generation).entered();

        let size = self.grid.size();
        let mut births = 0;
        let mut deaths = 0;

        self.grid.begin_next_generation();
        for y in 0..size {
            for x in 0..size {
                let alive = self.grid.current_at(x, y);
                let next = rule::next_state(alive, self.grid.neighbors_at(x, y));
                self.grid.write_next(x, y, next);
                if alive != next {
                    if next {
                        births += 1;
                    } else {
                        deaths += 1;
                    }
                    self.record(LifeEvent::CellChanged {
                        cell: CellCoord::new(x as i32, y as i32),
                        alive: next,
                        cause: ChangeCause::Tick,
                    });
                }
            }
        }
        self.grid.commit();
        self.generation = next_generation;

        self.record(LifeEvent::Advanced {
            generation: next_generation,
            births,
            deaths,
        });
        tracing::trace!(births, deaths, population = self.grid.population(), "generation committed");

        TickOutcome::Advanced {
            generation: next_generation,
            births,
            deaths,
        }
    }

    /// Append to the event log, collapsing it into `Resync` once full.
    fn record(&mut self, event: LifeEvent) {
        if self.overflowed {
            return;
        }
        if self.event_log.len() >= self.event_capacity {
            tracing::debug!(
                capacity = self.event_capacity,
                generation = self.generation,
                "event log full, collapsing to resync"
            );
            self.event_log.clear();
            self.event_log.push(LifeEvent::Resync);
            self.overflowed = true;
            return;
        }
        self.event_log.push(event);
    }

    /// Maximum number of undrained events. Clamped to at least 1.
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Change the event capacity. Takes effect on the next recorded event.
    pub fn set_event_capacity(&mut self, capacity: usize) {
        self.event_capacity = capacity.max(1);
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<LifeEvent> {
        self.overflowed = false;
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to undrained events.
    pub fn events(&self) -> &[LifeEvent] {
        &self.event_log
    }

    /// Hash of the current generation.
    pub fn state_hash(&self) -> u64 {
        self.grid.state_hash()
    }
}
