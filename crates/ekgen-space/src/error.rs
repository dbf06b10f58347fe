//! Error types for domain construction and region queries.

use ekgen_core::{Cell, DIM};
use std::fmt;

/// Errors arising from domain construction or region queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// An axis has zero interior cells.
    EmptyDomain {
        /// Index of the empty axis.
        axis: usize,
    },
    /// An axis exceeds the supported size.
    DomainTooLarge {
        /// Index of the axis.
        axis: usize,
        /// Requested size.
        size: u32,
        /// Largest supported size.
        max: u32,
    },
    /// The total number of cells does not fit in `usize`.
    TooManyCells {
        /// Cells per axis, ghosts included.
        shape: [u64; DIM],
    },
    /// The ghost depth grows an axis past [`DomainExtent::MAX_LEN`].
    ///
    /// [`DomainExtent::MAX_LEN`]: crate::DomainExtent::MAX_LEN
    GhostDepth {
        /// Requested ghost layers per side.
        ghost_layers: u32,
        /// Deepest ghost layer count the domain allows.
        max: u32,
    },
    /// A cell lies outside the iteration region.
    CellOutOfRegion {
        /// The offending cell.
        cell: Cell,
        /// Ghost layers of the region.
        ghost_layers: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain { axis } => {
                write!(f, "domain must have at least one cell along axis {axis}")
            }
            Self::DomainTooLarge { axis, size, max } => {
                write!(f, "domain size {size} along axis {axis} exceeds maximum {max}")
            }
            Self::TooManyCells { shape } => {
                write!(f, "{shape:?} cells cannot be addressed on this platform")
            }
            Self::GhostDepth { ghost_layers, max } => write!(
                f,
                "{ghost_layers} ghost layer(s) exceeds the maximum of {max} for this domain"
            ),
            Self::CellOutOfRegion { cell, ghost_layers } => write!(
                f,
                "cell {cell:?} outside the interior plus {ghost_layers} ghost layer(s)"
            ),
        }
    }
}

impl std::error::Error for SpaceError {}
