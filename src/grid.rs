use serde::{Deserialize, Serialize};

use crate::direction::{self, Direction};
use crate::rng::RandomSource;

/// Integer lattice coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One lattice position: occupancy plus the direction a wire passing
/// through it tries first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: Point,
    pub available: bool,
    pub preferred: Direction,
}

/// Row-major cell arena for one generation pass. Cell `(x, y)` lives at
/// index `y * cols + x`; that index is the only coordinate lookup.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    pub cols: usize,
    pub rows: usize,
    available: usize,
}

impl Grid {
    /// Build `rows * cols` available cells, each with an independently drawn
    /// preferred direction. Either bound being 0 gives an empty grid.
    ///
    /// # Panics
    /// If `rows * cols` overflows `usize`. `Params::validate_area` keeps
    /// requests far below that via `MAX_CELLS`.
    pub fn build(rows: usize, cols: usize, rng: &mut impl RandomSource) -> Self {
        let n = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("grid of {rows}x{cols} cells overflows usize"));
        let mut cells = Vec::with_capacity(n);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(Cell {
                    pos: Point::new(x, y),
                    available: true,
                    preferred: Direction::from_index(rng.below(direction::COUNT)),
                });
            }
        }
        Self {
            cells,
            cols,
            rows,
            available: n,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.cols && y < self.rows);
        y * self.cols + x
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells not yet claimed by any wire.
    #[inline]
    pub fn available_count(&self) -> usize {
        self.available
    }

    /// Bounds-checked signed lookup; anything off the lattice is `None`.
    #[inline]
    pub fn index_at(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.cols as i64 || y >= self.rows as i64 {
            return None;
        }
        Some(self.idx(x as usize, y as usize))
    }

    #[inline]
    pub fn cell_at(&self, x: i64, y: i64) -> Option<&Cell> {
        self.index_at(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn cell_by_index(&self, i: usize) -> &Cell {
        &self.cells[i]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Index of the neighbour one `dir` step away from `i`, if on the grid.
    #[inline]
    pub fn step(&self, i: usize, dir: Direction) -> Option<usize> {
        let p = self.cells[i].pos;
        let (dx, dy) = dir.delta();
        self.index_at(p.x as i64 + dx as i64, p.y as i64 + dy as i64)
    }

    /// Mark a cell as taken. Returns false if it already was.
    pub fn claim(&mut self, i: usize) -> bool {
        let cell = &mut self.cells[i];
        if !cell.available {
            return false;
        }
        cell.available = false;
        self.available -= 1;
        true
    }

    pub fn set_preferred(&mut self, i: usize, dir: Direction) {
        self.cells[i].preferred = dir;
    }
}
