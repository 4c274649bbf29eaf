use lifegrid_common::{CellCoord, LifeError};
use lifegrid_kernel::{LifeEngine, rule};
use serde::Serialize;

/// Grid inspector for developer tooling.
///
/// Read-only queries against the engine for debugging and CLI output.
pub struct GridInspector;

impl GridInspector {
    /// Produce a summary of the engine state.
    pub fn summary(engine: &LifeEngine) -> GridSummary {
        GridSummary {
            generation: engine.generation(),
            size: engine.size(),
            population: engine.population(),
            running: engine.is_running(),
            pending_events: engine.events().len(),
            hash: engine.state_hash(),
        }
    }

    /// State, neighbourhood and predicted next state of one cell.
    pub fn inspect_cell(engine: &LifeEngine, coord: CellCoord) -> Result<CellInfo, LifeError> {
        let alive = engine.get(coord.x, coord.y)?;
        let live_neighbors = engine.grid().count_live_neighbors(coord.x, coord.y)?;
        Ok(CellInfo {
            coord,
            alive,
            live_neighbors,
            next: rule::next_state(alive, live_neighbors),
        })
    }
}

/// Summary of engine state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct GridSummary {
    pub generation: u64,
    pub size: usize,
    pub population: usize,
    pub running: bool,
    pub pending_events: usize,
    pub hash: u64,
}

impl std::fmt::Display for GridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid: {}x{} generation={} population={} {} pending_events={} hash={:#018x}",
            self.size,
            self.size,
            self.generation,
            self.population,
            if self.running { "running" } else { "paused" },
            self.pending_events,
            self.hash
        )
    }
}

/// Detailed info about a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub coord: CellCoord,
    pub alive: bool,
    pub live_neighbors: u8,
    /// State the cell will have after the next tick, absent paints.
    pub next: bool,
}

impl std::fmt::Display for CellInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cell {} {} neighbours={} next={}",
            self.coord,
            if self.alive { "alive" } else { "dead" },
            self.live_neighbors,
            if self.next { "alive" } else { "dead" }
        )
    }
}
