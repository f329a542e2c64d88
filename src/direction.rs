/// The 8 compass steps, in one fixed rotational order.
///
/// Consecutive discriminants are adjacent directions, so "try the next
/// direction" is `rotate(1)`. Odd discriminants are the diagonals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    S = 0,
    SE = 1,
    E = 2,
    NE = 3,
    N = 4,
    NW = 5,
    W = 6,
    SW = 7,
}

pub const COUNT: usize = 8;

pub const ALL: [Direction; COUNT] = [
    Direction::S,
    Direction::SE,
    Direction::E,
    Direction::NE,
    Direction::N,
    Direction::NW,
    Direction::W,
    Direction::SW,
];

/// `(dx, dy)` per direction, y growing downwards.
const DELTAS: [(i32, i32); COUNT] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Offsets of the two orthogonal neighbours sharing the lattice corner a
/// diagonal step passes through. `None` for axis-aligned steps.
const FLANKS: [Option<[(i32, i32); 2]>; COUNT] = [
    None,
    Some([(1, 0), (0, 1)]),
    None,
    Some([(1, 0), (0, -1)]),
    None,
    Some([(-1, 0), (0, -1)]),
    None,
    Some([(-1, 0), (0, 1)]),
];

impl Direction {
    #[inline]
    pub fn from_index(i: usize) -> Self {
        ALL[i % COUNT]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn delta(self) -> (i32, i32) {
        DELTAS[self.index()]
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    #[inline]
    pub fn flanks(self) -> Option<[(i32, i32); 2]> {
        FLANKS[self.index()]
    }

    /// `steps` positions further along the rotation, wrapping modulo 8.
    #[inline]
    pub fn rotate(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// Direction whose delta is exactly `(dx, dy)`.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        DELTAS
            .iter()
            .position(|&d| d == (dx, dy))
            .map(Self::from_index)
    }
}
