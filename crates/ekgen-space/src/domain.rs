//! Interior extent of a periodic block.

use crate::error::SpaceError;
use ekgen_core::{Axis, Cell, DIM};

/// Interior size `L` of a block along each axis.
///
/// Cells `0..L` are interior; anything else is a ghost or beyond. Folding
/// maps any coordinate onto `[0, L)` with a floor modulo, so `-1` folds to
/// `L - 1` and `L` folds to `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DomainExtent {
    extent: [u32; DIM],
}

impl DomainExtent {
    /// Maximum length per axis: cell coordinates must stay exact in `f64`
    /// and offsets use `i32`.
    pub const MAX_LEN: u32 = i32::MAX as u32;

    /// Create an extent.
    ///
    /// Returns `Err(SpaceError::EmptyDomain)` if any axis is zero,
    /// `Err(SpaceError::DomainTooLarge)` if any axis exceeds [`Self::MAX_LEN`],
    /// or `Err(SpaceError::TooManyCells)` if the cell count overflows `usize`.
    pub fn new(extent: [u32; DIM]) -> Result<Self, SpaceError> {
        for (axis, &size) in extent.iter().enumerate() {
            if size == 0 {
                return Err(SpaceError::EmptyDomain { axis });
            }
            if size > Self::MAX_LEN {
                return Err(SpaceError::DomainTooLarge {
                    axis,
                    size,
                    max: Self::MAX_LEN,
                });
            }
        }
        checked_cell_count(extent.map(u64::from))?;
        Ok(Self { extent })
    }

    /// A cube with `n` cells per axis.
    pub fn cubic(n: u32) -> Result<Self, SpaceError> {
        Self::new([n; DIM])
    }

    /// Interior size per axis.
    pub fn extent(&self) -> [u32; DIM] {
        self.extent
    }

    /// Interior size along `axis`.
    pub fn len(&self, axis: Axis) -> u32 {
        self.extent[axis.index()]
    }

    /// Number of interior cells. Always fits, see [`Self::new`].
    pub fn cell_count(&self) -> usize {
        self.extent.iter().map(|&l| l as usize).product()
    }

    /// Fold a coordinate along `axis` onto `[0, L)`.
    pub fn fold(&self, axis: Axis, coord: i64) -> i64 {
        coord.rem_euclid(i64::from(self.len(axis)))
    }

    /// Fold every coordinate of `cell`.
    pub fn fold_cell(&self, cell: Cell) -> Cell {
        Axis::ALL.map(|axis| self.fold(axis, cell[axis.index()]))
    }

    /// Whether `cell` lies in the interior.
    pub fn is_interior(&self, cell: Cell) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| (0..i64::from(self.len(axis))).contains(&cell[axis.index()]))
    }
}

/// Product of `shape`, or `TooManyCells` if it does not fit in `usize`.
pub(crate) fn checked_cell_count(shape: [u64; DIM]) -> Result<usize, SpaceError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &l| {
            usize::try_from(l).ok().and_then(|l| acc.checked_mul(l))
        })
        .ok_or(SpaceError::TooManyCells { shape })
}
