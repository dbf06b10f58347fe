//! Iteration region: interior plus ghost layers.

use crate::domain::{checked_cell_count, DomainExtent};
use crate::error::SpaceError;
use ekgen_core::{Axis, Cell, DIM};

/// The cells a kernel sweep visits: the interior of `domain` grown by
/// `ghost_layers` on every side.
///
/// Cells are enumerated in kernel loop order, x fastest, z slowest, which
/// matches the `fzyx` layout's innermost stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IterationRegion {
    domain: DomainExtent,
    ghost_layers: u32,
}

impl IterationRegion {
    /// Interior plus `ghost_layers` on each side.
    ///
    /// Returns `Err(SpaceError::GhostDepth)` if the ghosts grow an axis past
    /// [`DomainExtent::MAX_LEN`], or `Err(SpaceError::TooManyCells)` if the
    /// grown region cannot be addressed.
    pub fn new(domain: DomainExtent, ghost_layers: u32) -> Result<Self, SpaceError> {
        let longest = domain.extent().into_iter().max().unwrap_or(0);
        let max = (DomainExtent::MAX_LEN - longest) / 2;
        if ghost_layers > max {
            return Err(SpaceError::GhostDepth { ghost_layers, max });
        }
        let grown = domain
            .extent()
            .map(|l| u64::from(l) + 2 * u64::from(ghost_layers));
        checked_cell_count(grown)?;
        Ok(Self {
            domain,
            ghost_layers,
        })
    }

    /// Interior only.
    pub fn interior(domain: DomainExtent) -> Self {
        Self {
            domain,
            ghost_layers: 0,
        }
    }

    /// The interior extent.
    pub fn domain(&self) -> DomainExtent {
        self.domain
    }

    /// Ghost layers included on each side.
    pub fn ghost_layers(&self) -> u32 {
        self.ghost_layers
    }

    fn lower(&self) -> i64 {
        -i64::from(self.ghost_layers)
    }

    /// Number of cells along each axis, ghosts included.
    pub fn shape(&self) -> [usize; DIM] {
        Axis::ALL.map(|axis| (self.domain.len(axis) + 2 * self.ghost_layers) as usize)
    }

    /// Total number of cells, ghosts included.
    pub fn cell_count(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether `cell` lies inside the region.
    pub fn contains(&self, cell: Cell) -> bool {
        let shape = self.shape();
        Axis::ALL.iter().all(|&axis| {
            let rel = cell[axis.index()] - self.lower();
            rel >= 0 && (rel as usize) < shape[axis.index()]
        })
    }

    /// Whether `cell` is a ghost cell of this region.
    pub fn is_ghost(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.domain.is_interior(cell)
    }

    /// Flat index of `cell` in loop order.
    ///
    /// Returns `Err(SpaceError::CellOutOfRegion)` if the cell is outside.
    pub fn index_of(&self, cell: Cell) -> Result<usize, SpaceError> {
        if !self.contains(cell) {
            return Err(SpaceError::CellOutOfRegion {
                cell,
                ghost_layers: self.ghost_layers,
            });
        }
        let [sx, sy, _] = self.shape();
        let rel = cell.map(|c| (c - self.lower()) as usize);
        Ok((rel[2] * sy + rel[1]) * sx + rel[0])
    }

    /// The cell with flat index `index`, or `None` past the end.
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.cell_count() {
            return None;
        }
        let [sx, sy, _] = self.shape();
        let rel = [index % sx, (index / sx) % sy, index / (sx * sy)];
        Some(rel.map(|r| r as i64 + self.lower()))
    }

    /// All cells in loop order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).filter_map(move |i| self.cell_at(i))
    }

    /// The interior cell a ghost cell mirrors under periodic boundaries.
    /// Interior cells map to themselves.
    pub fn periodic_image(&self, cell: Cell) -> Cell {
        self.domain.fold_cell(cell)
    }
}
