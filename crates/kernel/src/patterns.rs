use lifegrid_common::CellCoord;

/// A named seed shape. Cells are `(x, y)` offsets from the top-left corner of
/// the pattern's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
    /// Generations until the shape repeats.
    pub period: u32,
    /// Translation of the shape after one period.
    pub displacement: (i32, i32),
}

impl Pattern {
    /// Absolute cell positions with the bounding box placed at `origin`.
    pub fn cells_at(&self, origin: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| origin.offset(dx, dy))
    }

    /// Bounding box `(width, height)`.
    pub fn extent(&self) -> (i32, i32) {
        let w = self.cells.iter().map(|c| c.0).max().unwrap_or(-1) + 1;
        let h = self.cells.iter().map(|c| c.1).max().unwrap_or(-1) + 1;
        (w, h)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        period: 4,
        displacement: (1, 1),
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
        period: 2,
        displacement: (0, 0),
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
        period: 2,
        displacement: (0, 0),
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
        period: 2,
        displacement: (0, 0),
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
        period: 1,
        displacement: (0, 0),
    },
];

/// Look up a built-in pattern by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
