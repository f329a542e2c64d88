use serde::Serialize;

use crate::crossover::is_step_visually_clear;
use crate::direction;
use crate::grid::{Grid, Point};

/// An ordered, non-empty chain of 8-adjacent lattice points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Wire {
    cells: Vec<Point>,
}

impl Wire {
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a routed wire; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Point {
        self.cells[0]
    }

    pub fn last(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }
}

/// Grow one wire from `seed` with a self-avoiding, direction-biased walk.
///
/// The seed must be available. At every step the search starts at the last
/// cell's preferred direction and rotates through all 8; the first step that
/// stays on the grid, lands on a free cell and passes the crossover check
/// wins. The new cell inherits that direction as its own preference, so
/// wires keep their heading until blocked. The walk ends at `max_len` cells
/// or when all 8 directions fail.
pub fn route(grid: &mut Grid, seed: usize, max_len: usize) -> Wire {
    let claimed = grid.claim(seed);
    debug_assert!(claimed, "seed cell already taken");

    let max_len = max_len.max(1);
    let mut cells = Vec::with_capacity(max_len.min(grid.available_count() + 1));
    cells.push(grid.cell_by_index(seed).pos);
    let mut last = seed;

    while cells.len() < max_len {
        let heading = grid.cell_by_index(last).preferred;
        let next = (0..direction::COUNT).find_map(|attempt| {
            let dir = heading.rotate(attempt);
            let n = grid.step(last, dir)?;
            if !grid.cell_by_index(n).available || !is_step_visually_clear(grid, last, dir) {
                return None;
            }
            Some((n, dir))
        });

        let Some((n, dir)) = next else {
            break;
        };
        grid.claim(n);
        grid.set_preferred(n, dir);
        cells.push(grid.cell_by_index(n).pos);
        last = n;
    }

    Wire { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::rng::Rng;

    /// Grid with every cell preferring `dir`.
    fn uniform(rows: usize, cols: usize, dir: Direction) -> Grid {
        let mut grid = Grid::build(rows, cols, &mut Rng::new(0));
        for i in 0..grid.len() {
            grid.set_preferred(i, dir);
        }
        grid
    }

    fn is_adjacent(a: Point, b: Point) -> bool {
        let dx = b.x as i32 - a.x as i32;
        let dy = b.y as i32 - a.y as i32;
        Direction::from_delta(dx, dy).is_some()
    }

    #[test]
    fn straight_run_follows_preference() {
        let mut grid = uniform(1, 6, Direction::E);
        let wire = route(&mut grid, 0, 10);
        let xs: Vec<usize> = wire.cells().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(grid.available_count(), 0);
    }

    #[test]
    fn stops_at_max_len() {
        let mut grid = uniform(1, 6, Direction::E);
        let wire = route(&mut grid, 0, 3);
        assert_eq!(wire.len(), 3);
        assert_eq!(wire.last(), Point::new(2, 0));
        assert_eq!(grid.available_count(), 3);
    }

    #[test]
    fn max_len_zero_still_claims_seed() {
        let mut grid = uniform(2, 2, Direction::E);
        let wire = route(&mut grid, 0, 0);
        assert_eq!(wire.len(), 1);
    }

    #[test]
    fn isolated_seed_yields_single_cell() {
        let mut grid = uniform(3, 3, Direction::E);
        for i in 0..grid.len() {
            if i != 4 {
                grid.claim(i);
            }
        }
        let wire = route(&mut grid, 4, 5);
        assert_eq!(wire.cells(), &[Point::new(1, 1)]);
    }

    #[test]
    fn turns_clockwise_when_blocked_at_edge() {
        // Heading S from the bottom row: S off-grid, SE off-grid, E taken next.
        let mut grid = uniform(2, 3, Direction::S);
        let seed = grid.idx(0, 1);
        let wire = route(&mut grid, seed, 2);
        assert_eq!(wire.cells(), &[Point::new(0, 1), Point::new(1, 1)]);
        assert_eq!(grid.cell_by_index(grid.idx(1, 1)).preferred, Direction::E);
    }

    #[test]
    fn never_leaves_grid_from_edges() {
        for seed in 0..20 {
            let mut grid = Grid::build(4, 5, &mut Rng::new(seed));
            for start in [0usize, 4, 15, 19, 2, 10] {
                if !grid.cell_by_index(start).available {
                    continue;
                }
                let wire = route(&mut grid, start, 40);
                for p in wire.cells() {
                    assert!(p.x < 5 && p.y < 4);
                }
            }
        }
    }

    #[test]
    fn wire_cells_are_adjacent_and_distinct() {
        let mut grid = Grid::build(12, 12, &mut Rng::new(77));
        let wire = route(&mut grid, 66, 40);
        for pair in wire.cells().windows(2) {
            assert!(is_adjacent(pair[0], pair[1]), "{pair:?}");
        }
        let mut seen = wire.cells().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), wire.len());
    }

    #[test]
    fn diagonal_blocked_by_claimed_flank() {
        // Another wire holds (1,0). From (0,0) the SE step to (1,1) cuts the
        // corner next to it, E is taken and NE..SW leave the grid, so the
        // search wraps round to S.
        let mut grid = uniform(3, 3, Direction::SE);
        grid.claim(grid.idx(1, 0));
        let wire = route(&mut grid, 0, 2);
        assert_eq!(wire.cells(), &[Point::new(0, 0), Point::new(0, 1)]);
    }
}
