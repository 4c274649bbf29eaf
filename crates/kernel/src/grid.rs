use lifegrid_common::config::{validate_grid_size, validate_probability};
use lifegrid_common::{CellCoord, LifeError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Double-buffered N×N boolean grid.
///
/// `current` is the authoritative generation every reader sees. `next` is
/// scratch space written only by the engine while it computes a generation,
/// and becomes visible as a whole on `commit`.
///
/// Cells are stored row-major: index = `y * size + x`. Cells outside the grid
/// are dead; there is no wraparound.
///
/// Two grids are equal when their current generations are; the scratch
/// buffer does not take part.
#[derive(Debug, Clone)]
pub struct GridStore {
    size: usize,
    current: Vec<bool>,
    next: Vec<bool>,
}

impl PartialEq for GridStore {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.current == other.current
    }
}

impl Eq for GridStore {}

impl GridStore {
    /// An all-dead grid of the given side length.
    pub fn new(size: usize) -> Result<Self, LifeError> {
        validate_grid_size(size)?;
        Ok(Self {
            size,
            current: vec![false; size * size],
            next: vec![false; size * size],
        })
    }

    /// A grid where each cell is independently alive with `probability`.
    pub fn random<R: Rng>(size: usize, probability: f64, rng: &mut R) -> Result<Self, LifeError> {
        validate_probability(probability)?;
        let mut grid = Self::new(size)?;
        for cell in &mut grid.current {
            *cell = rng.gen_bool(probability);
        }
        Ok(grid)
    }

    /// Build the initial state. With a seed the result is reproducible;
    /// without one the generator is seeded from OS entropy.
    pub fn initialize(size: usize, probability: f64, seed: Option<u64>) -> Result<Self, LifeError> {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid = Self::random(size, probability, &mut rng)?;
        tracing::debug!(size, probability, ?seed, population = grid.population(), "grid initialized");
        Ok(grid)
    }

    /// Build a grid from row strings, `#` alive and anything else dead.
    /// Rows must all be as long as there are rows.
    pub fn from_rows(rows: &[&str]) -> Result<Self, LifeError> {
        let mut grid = Self::new(rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != grid.size {
                return Err(LifeError::invalid(format!(
                    "row {y} has {} cells, expected {}",
                    row.chars().count(),
                    grid.size
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                grid.current[y * grid.size + x] = ch == '#';
            }
        }
        Ok(grid)
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `(x, y)` lies on the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Current state of a cell.
    pub fn get(&self, x: i32, y: i32) -> Result<bool, LifeError> {
        let i = self.checked_index(x, y)?;
        Ok(self.current[i])
    }

    /// Overwrite a cell in the current generation. Nothing is recomputed.
    pub fn set(&mut self, x: i32, y: i32, alive: bool) -> Result<(), LifeError> {
        let i = self.checked_index(x, y)?;
        self.current[i] = alive;
        Ok(())
    }

    /// Live cells among the up-to-8 Moore neighbours, clipped at the edge.
    pub fn count_live_neighbors(&self, x: i32, y: i32) -> Result<u8, LifeError> {
        self.checked_index(x, y)?;
        Ok(self.neighbors_at(x as usize, y as usize))
    }

    /// Clear the scratch buffer ahead of a generation computation.
    pub(crate) fn begin_next_generation(&mut self) {
        self.next.fill(false);
    }

    /// Write a cell of the generation being computed. Coordinates come from
    /// the engine's own raster loop and are always in range.
    pub(crate) fn write_next(&mut self, x: usize, y: usize, alive: bool) {
        debug_assert!(x < self.size && y < self.size);
        self.next[y * self.size + x] = alive;
    }

    /// Promote `next` to `current`. The old generation becomes scratch.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Value of a cell in the scratch buffer, for diffing before commit.
    pub(crate) fn next_at(&self, x: usize, y: usize) -> bool {
        self.next[y * self.size + x]
    }

    pub(crate) fn current_at(&self, x: usize, y: usize) -> bool {
        self.current[y * self.size + x]
    }

    /// Unchecked neighbour count for in-range `usize` coordinates.
    pub(crate) fn neighbors_at(&self, x: usize, y: usize) -> u8 {
        let last = self.size - 1;
        let mut count = 0;
        for ny in y.saturating_sub(1)..=(y + 1).min(last) {
            for nx in x.saturating_sub(1)..=(x + 1).min(last) {
                if (nx, ny) != (x, y) && self.current[ny * self.size + nx] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.current.iter().filter(|c| **c).count()
    }

    /// Coordinates of every live cell in raster order (row by row).
    pub fn live_cells(&self) -> Vec<CellCoord> {
        self.current
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| CellCoord::new((i % self.size) as i32, (i / self.size) as i32))
            .collect()
    }

    /// Row-major view of the current generation.
    pub fn cells(&self) -> &[bool] {
        &self.current
    }

    /// FNV-1a over the side length and current cells.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |b: u8| {
            h ^= b as u64;
            h = h.wrapping_mul(0x0100_0000_01b3);
        };
        for b in (self.size as u64).to_le_bytes() {
            mix(b);
        }
        for &cell in &self.current {
            mix(cell as u8);
        }
        h
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.size)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.size)?;
        Some(y * self.size + x)
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize, LifeError> {
        self.index(x, y).ok_or(LifeError::OutOfBounds {
            x,
            y,
            size: self.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_dead() {
        let g = GridStore::new(6).unwrap();
        assert_eq!(g.size(), 6);
        assert_eq!(g.population(), 0);
        assert_eq!(g.cells().len(), 36);
    }

    #[test]
    fn zero_size_rejected() {
        assert!(matches!(
            GridStore::new(0),
            Err(LifeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn bad_probability_rejected() {
        assert!(GridStore::initialize(5, 1.01, Some(1)).is_err());
        assert!(GridStore::initialize(5, -0.5, Some(1)).is_err());
    }

    #[test]
    fn probability_extremes() {
        let dead = GridStore::initialize(8, 0.0, Some(3)).unwrap();
        assert_eq!(dead.population(), 0);
        let full = GridStore::initialize(8, 1.0, Some(3)).unwrap();
        assert_eq!(full.population(), 64);
    }

    #[test]
    fn same_seed_same_grid() {
        let a = GridStore::initialize(20, 0.5, Some(42)).unwrap();
        let b = GridStore::initialize(20, 0.5, Some(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = GridStore::initialize(20, 0.5, Some(1)).unwrap();
        let b = GridStore::initialize(20, 0.5, Some(2)).unwrap();
        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn half_probability_is_roughly_half() {
        let g = GridStore::initialize(100, 0.5, Some(9)).unwrap();
        let pop = g.population();
        assert!((4000..6000).contains(&pop), "population {pop}");
    }

    #[test]
    fn set_then_get() {
        let mut g = GridStore::new(4).unwrap();
        g.set(1, 2, true).unwrap();
        assert!(g.get(1, 2).unwrap());
        assert!(!g.get(2, 1).unwrap());
        g.set(1, 2, false).unwrap();
        assert!(!g.get(1, 2).unwrap());
    }

    #[test]
    fn out_of_bounds_rejected_without_mutation() {
        let mut g = GridStore::initialize(5, 0.5, Some(11)).unwrap();
        let before = g.clone();
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (-1, 5)] {
            assert_eq!(
                g.get(x, y),
                Err(LifeError::OutOfBounds { x, y, size: 5 })
            );
            assert_eq!(
                g.set(x, y, true),
                Err(LifeError::OutOfBounds { x, y, size: 5 })
            );
            assert!(g.count_live_neighbors(x, y).is_err());
        }
        assert_eq!(g, before);
    }

    #[test]
    fn neighbors_center_and_corner() {
        let g = GridStore::from_rows(&["###", "###", "###"]).unwrap();
        assert_eq!(g.count_live_neighbors(1, 1).unwrap(), 8);
        assert_eq!(g.count_live_neighbors(0, 0).unwrap(), 3);
        assert_eq!(g.count_live_neighbors(1, 0).unwrap(), 5);
    }

    #[test]
    fn edge_is_not_toroidal() {
        // Live cells on the opposite edges would be neighbours of (0, 0)
        // only under wraparound.
        let g = GridStore::from_rows(&["....#", ".....", ".....", ".....", "#...#"]).unwrap();
        assert_eq!(g.count_live_neighbors(0, 0).unwrap(), 0);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let g = GridStore::from_rows(&["#"]).unwrap();
        assert_eq!(g.count_live_neighbors(0, 0).unwrap(), 0);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(GridStore::from_rows(&["##", "#"]).is_err());
        assert!(GridStore::from_rows(&[]).is_err());
    }

    #[test]
    fn commit_swaps_buffers() {
        let mut g = GridStore::new(3).unwrap();
        g.set(0, 0, true).unwrap();
        g.begin_next_generation();
        g.write_next(2, 2, true);
        // Scratch writes stay invisible until commit.
        assert!(!g.get(2, 2).unwrap());
        assert!(g.get(0, 0).unwrap());

        g.commit();
        assert!(g.get(2, 2).unwrap());
        assert!(!g.get(0, 0).unwrap());
    }

    #[test]
    fn equality_ignores_scratch_buffer() {
        let fresh = GridStore::from_rows(&["...", "###", "..."]).unwrap();
        let mut stepped = fresh.clone();
        stepped.begin_next_generation();
        stepped.write_next(0, 0, true);
        assert_eq!(stepped, fresh);

        stepped.commit();
        assert_ne!(stepped, fresh);
    }

    #[test]
    fn begin_next_generation_clears_scratch() {
        let mut g = GridStore::new(3).unwrap();
        g.begin_next_generation();
        g.write_next(1, 1, true);
        g.begin_next_generation();
        assert!(!g.next_at(1, 1));
    }

    #[test]
    fn live_cells_in_raster_order() {
        let g = GridStore::from_rows(&[".#.", "#..", "..#"]).unwrap();
        assert_eq!(
            g.live_cells(),
            vec![CellCoord::new(1, 0), CellCoord::new(0, 1), CellCoord::new(2, 2)]
        );
    }

    #[test]
    fn state_hash_tracks_content() {
        let mut g = GridStore::new(4).unwrap();
        let empty = g.state_hash();
        g.set(3, 3, true).unwrap();
        assert_ne!(g.state_hash(), empty);
        g.set(3, 3, false).unwrap();
        assert_eq!(g.state_hash(), empty);
    }
}
