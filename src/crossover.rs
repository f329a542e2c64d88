use crate::direction::Direction;
use crate::grid::Grid;

/// Whether stepping from cell `from` in `dir` keeps clear of other wires at
/// the lattice corner the step passes through.
///
/// Axis-aligned steps never touch a corner. A diagonal step is clear only if
/// both orthogonal neighbours flanking that corner are off the grid or still
/// unclaimed; a claimed flank means some wire may already cut the corner.
pub fn is_step_visually_clear(grid: &Grid, from: usize, dir: Direction) -> bool {
    let Some(flanks) = dir.flanks() else {
        return true;
    };
    let p = grid.cell_by_index(from).pos;
    flanks.iter().all(|&(dx, dy)| {
        grid.cell_at(p.x as i64 + dx as i64, p.y as i64 + dy as i64)
            .is_none_or(|c| c.available)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::ALL;
    use crate::rng::Rng;

    fn grid3() -> Grid {
        Grid::build(3, 3, &mut Rng::new(11))
    }

    #[test]
    fn axis_steps_always_clear() {
        let mut grid = grid3();
        for i in 0..grid.len() {
            if i != 4 {
                grid.claim(i);
            }
        }
        for d in ALL.into_iter().filter(|d| !d.is_diagonal()) {
            assert!(is_step_visually_clear(&grid, 4, d));
        }
    }

    #[test]
    fn diagonal_clear_on_empty_grid() {
        let grid = grid3();
        for d in ALL {
            assert!(is_step_visually_clear(&grid, 4, d));
        }
    }

    #[test]
    fn claimed_flank_blocks_diagonal() {
        let mut grid = grid3();
        // Claim the cell right of the centre: (2, 1).
        grid.claim(grid.idx(2, 1));
        assert!(!is_step_visually_clear(&grid, 4, Direction::SE));
        assert!(!is_step_visually_clear(&grid, 4, Direction::NE));
        assert!(is_step_visually_clear(&grid, 4, Direction::SW));
        assert!(is_step_visually_clear(&grid, 4, Direction::NW));
    }

    #[test]
    fn vertical_flank_blocks_diagonal() {
        let mut grid = grid3();
        // Claim the cell above the centre: (1, 0).
        grid.claim(grid.idx(1, 0));
        assert!(!is_step_visually_clear(&grid, 4, Direction::NE));
        assert!(!is_step_visually_clear(&grid, 4, Direction::NW));
        assert!(is_step_visually_clear(&grid, 4, Direction::SE));
        assert!(is_step_visually_clear(&grid, 4, Direction::SW));
    }

    #[test]
    fn missing_flanks_count_as_clear() {
        let grid = grid3();
        // Corner (0, 0) stepping NW: both flanks are off-grid.
        assert!(is_step_visually_clear(&grid, 0, Direction::NW));
    }
}
