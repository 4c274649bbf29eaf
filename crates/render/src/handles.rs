use lifegrid_common::CellCoord;
use lifegrid_kernel::{GridStore, LifeEvent};

/// Material a cell's drawable should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMaterial {
    Alive,
    Dead,
}

impl CellMaterial {
    pub fn for_state(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

/// Renderer-owned array of drawable handles, one per grid cell.
///
/// Built once from the grid, then kept in sync by feeding it the engine's
/// drained events; only cells named in `CellChanged` are touched.
#[derive(Debug, Clone)]
pub struct CellHandles<H> {
    size: usize,
    handles: Vec<H>,
}

impl<H> CellHandles<H> {
    /// Create one handle per cell from its coordinate and current state.
    pub fn build(grid: &GridStore, mut make: impl FnMut(CellCoord, bool) -> H) -> Self {
        let size = grid.size();
        let handles = grid
            .cells()
            .iter()
            .enumerate()
            .map(|(i, &alive)| make(CellCoord::new((i % size) as i32, (i / size) as i32), alive))
            .collect();
        Self { size, handles }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: CellCoord) -> Option<&H> {
        self.index(coord).map(|i| &self.handles[i])
    }

    /// Apply cell changes to their handles. Returns how many were updated.
    pub fn apply(&mut self, events: &[LifeEvent], mut update: impl FnMut(&mut H, bool)) -> usize {
        let mut updated = 0;
        for event in events {
            let LifeEvent::CellChanged { cell, alive, .. } = event else {
                continue;
            };
            match self.index(*cell) {
                Some(i) => {
                    update(&mut self.handles[i], *alive);
                    updated += 1;
                }
                None => tracing::warn!(%cell, "change for a cell outside the handle array"),
            }
        }
        updated
    }

    /// Bring every handle up to date with `grid` given the events drained
    /// from it. A `Resync` in the batch means events were lost, so all
    /// handles are refreshed from the grid instead. Returns how many were
    /// updated.
    pub fn sync(
        &mut self,
        grid: &GridStore,
        events: &[LifeEvent],
        mut update: impl FnMut(&mut H, bool),
    ) -> usize {
        if !events.iter().any(|e| matches!(e, LifeEvent::Resync)) {
            return self.apply(events, update);
        }
        if grid.size() != self.size {
            tracing::warn!(grid = grid.size(), handles = self.size, "resync against a grid of another size");
        }
        tracing::debug!(cells = self.handles.len(), "event log overflowed, refreshing all handles");
        let mut updated = 0;
        for (h, &alive) in self.handles.iter_mut().zip(grid.cells()) {
            update(h, alive);
            updated += 1;
        }
        updated
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &H)> {
        let size = self.size;
        self.handles
            .iter()
            .enumerate()
            .map(move |(i, h)| (CellCoord::new((i % size) as i32, (i / size) as i32), h))
    }

    fn index(&self, c: CellCoord) -> Option<usize> {
        let x = usize::try_from(c.x).ok().filter(|x| *x < self.size)?;
        let y = usize::try_from(c.y).ok().filter(|y| *y < self.size)?;
        Some(y * self.size + x)
    }
}
