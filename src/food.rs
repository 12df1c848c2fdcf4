use std::collections::HashSet;

use rand::Rng;
use tracing::warn;

use crate::grid::{Cell, Grid};

/// Picks a free cell uniformly at random.
///
/// Sampling gives up after `attempts` misses and falls back to the first free
/// cell in row-major order, so the call always terminates. Returns `None` only
/// when every cell of the grid is occupied.
pub fn spawn<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &HashSet<Cell>,
    attempts: u32,
    rng: &mut R,
) -> Option<Cell> {
    for _ in 0..attempts {
        let cell = Cell {
            x: rng.gen_range(0..grid.width()),
            y: rng.gen_range(0..grid.height()),
        };
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }
    warn!(attempts, occupied = occupied.len(), "random food placement missed, scanning grid");
    grid.cells().find(|cell| !occupied.contains(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn never_lands_on_the_snake() {
        let grid = Grid::new(8, 6);
        let occupied: HashSet<Cell> = grid.cells().filter(|c| c.x < 6).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let cell = spawn(&grid, &occupied, 10_000, &mut rng).unwrap();
            assert!(grid.contains(cell));
            assert!(!occupied.contains(&cell));
        }
    }

    #[test]
    fn falls_back_to_row_major_scan() {
        let grid = Grid::new(4, 4);
        let free = [Cell::new(3, 1), Cell::new(2, 3)];
        let occupied: HashSet<Cell> = grid.cells().filter(|c| !free.contains(c)).collect();
        let mut rng = StdRng::seed_from_u64(1);
        // With zero sampling attempts the scan decides.
        assert_eq!(spawn(&grid, &occupied, 0, &mut rng), Some(Cell::new(3, 1)));
    }

    #[test]
    fn full_grid_has_no_free_cell() {
        let grid = Grid::new(3, 3);
        let occupied: HashSet<Cell> = grid.cells().collect();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(spawn(&grid, &occupied, 50, &mut rng), None);
    }

    #[test]
    fn single_free_cell_is_found() {
        let grid = Grid::new(5, 5);
        let occupied: HashSet<Cell> = grid.cells().filter(|c| *c != Cell::new(4, 4)).collect();
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(spawn(&grid, &occupied, 10, &mut rng), Some(Cell::new(4, 4)));
    }
}
