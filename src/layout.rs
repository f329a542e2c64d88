use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Params;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::router::{Wire, route};

/// Result of one generation pass: the wires plus the lattice they live on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    /// Drawing area in pixels.
    pub width: f32,
    pub height: f32,
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
    /// Wire count the pass aimed for.
    pub target: usize,
    /// Random seed picks spent, including picks that hit taken cells.
    pub seed_attempts: usize,
    pub wires: Vec<Wire>,
}

impl Layout {
    /// True when the pass stopped before reaching `target`.
    pub fn is_short(&self) -> bool {
        self.wires.len() < self.target
    }

    pub fn cell_count(&self) -> usize {
        self.wires.iter().map(Wire::len).sum()
    }
}

/// `(rows, cols)` for a pixel area. Anything degenerate gives zero.
pub fn grid_dims(width: f32, height: f32, cell_size: f32) -> (usize, usize) {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return (0, 0);
    }
    let cells = |px: f32| {
        if px.is_finite() && px > 0.0 {
            (px / cell_size).floor() as usize
        } else {
            0
        }
    };
    (cells(height), cells(width))
}

/// How many wires to aim for: one per `max_wire_len + leave` cells.
pub fn target_wire_count(rows: usize, cols: usize, max_wire_len: usize, leave: usize) -> usize {
    rows.saturating_mul(cols) / max_wire_len.max(1).saturating_add(leave)
}

/// Run one full generation pass on a fresh grid.
///
/// The same `rng` draws every cell's preferred direction and then every seed
/// pick, so a seeded source replays the whole layout.
pub fn generate(width: f32, height: f32, params: &Params, rng: &mut impl RandomSource) -> Layout {
    let (rows, cols) = grid_dims(width, height, params.cell_size);
    let target = target_wire_count(rows, cols, params.max_wire_len, params.leave);
    let mut grid = Grid::build(rows, cols, rng);

    let attempt_cap = grid.len().saturating_mul(params.seed_attempt_factor.max(1));
    let (wires, seed_attempts) =
        place_wires(&mut grid, target, params.max_wire_len, attempt_cap, rng);

    let layout = Layout {
        width: width.max(0.0),
        height: height.max(0.0),
        rows,
        cols,
        cell_size: params.cell_size,
        target,
        seed_attempts,
        wires,
    };

    debug!(
        rows,
        cols,
        target,
        placed = layout.wires.len(),
        attempts = seed_attempts,
        free = grid.available_count(),
        "layout pass finished"
    );
    if layout.is_short() {
        warn!(
            target,
            placed = layout.wires.len(),
            attempts = seed_attempts,
            "grid saturated before wire quota was reached"
        );
    }
    layout
}

/// Seed and route wires until `target` is met, the grid has no free cell, or
/// `attempt_cap` seed picks have been spent. Picks landing on a taken cell
/// are discarded. Returns the wires and the number of picks used.
pub fn place_wires(
    grid: &mut Grid,
    target: usize,
    max_wire_len: usize,
    attempt_cap: usize,
    rng: &mut impl RandomSource,
) -> (Vec<Wire>, usize) {
    let mut wires = Vec::with_capacity(target);
    let mut attempts = 0usize;

    while wires.len() < target && grid.available_count() > 0 && attempts < attempt_cap {
        attempts += 1;
        let i = rng.below(grid.len());
        if !grid.cell_by_index(i).available {
            continue;
        }
        wires.push(route(grid, i, max_wire_len));
    }

    (wires, attempts)
}
