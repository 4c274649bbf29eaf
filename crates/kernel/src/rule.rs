/// Conway's B3/S23 transition for one cell.
///
/// A live cell survives with 2 or 3 live neighbours; a dead cell is born with
/// exactly 3. Everything else is dead in the next generation.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2 | 3) | (false, 3))
}
