use lifegrid_common::{CellCoord, LifeError};
use lifegrid_kernel::{LifeEngine, SharedEngine};

/// A discrete command the input layer hands to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Flip the running flag.
    ToggleRunning,
    /// Set one cell alive or dead.
    Paint { cell: CellCoord, alive: bool },
}

/// Anything actions can be applied to.
pub trait ActionSink {
    fn toggle_running(&mut self) -> bool;
    fn paint(&mut self, x: i32, y: i32, alive: bool) -> Result<(), LifeError>;
}

impl ActionSink for LifeEngine {
    fn toggle_running(&mut self) -> bool {
        LifeEngine::toggle_running(self)
    }

    fn paint(&mut self, x: i32, y: i32, alive: bool) -> Result<(), LifeError> {
        LifeEngine::paint(self, x, y, alive)
    }
}

impl ActionSink for SharedEngine {
    fn toggle_running(&mut self) -> bool {
        SharedEngine::toggle_running(self)
    }

    fn paint(&mut self, x: i32, y: i32, alive: bool) -> Result<(), LifeError> {
        SharedEngine::paint(self, x, y, alive)
    }
}

/// Apply one action. A paint outside the grid is returned as `OutOfBounds`
/// and leaves the grid untouched.
pub fn dispatch<S: ActionSink + ?Sized>(sink: &mut S, action: &Action) -> Result<(), LifeError> {
    match *action {
        Action::ToggleRunning => {
            let running = sink.toggle_running();
            tracing::debug!(running, "simulation toggled");
            Ok(())
        }
        Action::Paint { cell, alive } => sink.paint(cell.x, cell.y, alive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_kernel::GridStore;

    #[test]
    fn dispatch_toggle() {
        let mut engine = LifeEngine::new(GridStore::new(3).unwrap());
        dispatch(&mut engine, &Action::ToggleRunning).unwrap();
        assert!(engine.is_running());
    }

    #[test]
    fn dispatch_paint() {
        let mut engine = LifeEngine::new(GridStore::new(3).unwrap());
        let paint = Action::Paint {
            cell: CellCoord::new(2, 0),
            alive: true,
        };
        dispatch(&mut engine, &paint).unwrap();
        assert!(engine.get(2, 0).unwrap());
        assert!(!engine.is_running());
    }

    #[test]
    fn dispatch_off_grid_paint_reports_failure() {
        let mut engine = LifeEngine::new(GridStore::new(3).unwrap());
        let paint = Action::Paint {
            cell: CellCoord::new(3, 1),
            alive: true,
        };
        assert_eq!(
            dispatch(&mut engine, &paint),
            Err(LifeError::OutOfBounds { x: 3, y: 1, size: 3 })
        );
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn dispatch_to_shared_engine() {
        let mut shared = SharedEngine::new(LifeEngine::new(GridStore::new(4).unwrap()));
        dispatch(
            &mut shared,
            &Action::Paint {
                cell: CellCoord::new(1, 1),
                alive: true,
            },
        )
        .unwrap();
        dispatch(&mut shared, &Action::ToggleRunning).unwrap();
        assert!(shared.get(1, 1).unwrap());
        assert!(shared.is_running());
    }
}
