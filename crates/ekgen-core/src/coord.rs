//! Axes, relative offsets and absolute cell coordinates.

use smallvec::SmallVec;
use std::fmt;

/// Number of spatial dimensions of every generated kernel.
pub const DIM: usize = 3;

/// A relative neighbour offset `[x, y, z]`.
pub type Offset = [i32; 3];

/// An absolute cell coordinate `[x, y, z]`.
///
/// Ghost cells have coordinates outside `[0, L)` and may be negative.
pub type Cell = [i64; 3];

/// One of the three spatial axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First axis, fastest varying in `fzyx` layout.
    X,
    /// Second axis.
    Y,
    /// Third axis, slowest varying in `fzyx` layout.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; DIM] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis (`0..3`).
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// The axis with the given index, or `None` if `index >= 3`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Unit offset pointing along the positive axis.
    pub fn unit(self) -> Offset {
        let mut off = [0; DIM];
        off[self.index()] = 1;
        off
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Component-wise sum of two offsets.
pub fn offset_add(a: Offset, b: Offset) -> Offset {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// The inverse offset `-a`.
pub fn offset_neg(a: Offset) -> Offset {
    [-a[0], -a[1], -a[2]]
}

/// Euclidean length of an offset.
pub fn offset_norm(a: Offset) -> f64 {
    let sq: i32 = a.iter().map(|c| c * c).sum();
    f64::from(sq).sqrt()
}

/// Axes along which the offset has a non-zero component.
pub fn nonzero_axes(a: Offset) -> SmallVec<[Axis; DIM]> {
    Axis::ALL
        .iter()
        .copied()
        .filter(|axis| a[axis.index()] != 0)
        .collect()
}

/// Translate a cell by a relative offset.
pub fn shift_cell(cell: Cell, off: Offset) -> Cell {
    [
        cell[0] + i64::from(off[0]),
        cell[1] + i64::from(off[1]),
        cell[2] + i64::from(off[2]),
    ]
}
