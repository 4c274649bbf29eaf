use serde::{Deserialize, Serialize};

/// A cell position on the grid. `x` is the column, `y` the row.
///
/// Signed so that an imprecise screen projection (e.g. `-1`) can be carried
/// to the grid and refused there instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a signed offset, saturating at the `i32` limits.
    ///
    /// Grid sides never exceed `i32::MAX`, so a saturated coordinate always
    /// lies off the grid and is refused there.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
