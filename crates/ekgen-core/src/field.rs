//! Field declarations.
//!
//! A [`Field`] is a named, typed 3D array with ghost layers. Builders never
//! touch memory; they only produce [`FieldAccess`] nodes against the
//! declaration.

use crate::coord::{Offset, DIM};
use crate::error::GenError;
use crate::expr::{Expr, FieldAccess};
use crate::stencil::{Direction, Stencil};
use std::fmt;

/// Floating-point element type of a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 32-bit float.
    #[default]
    F32,
    /// 64-bit float.
    F64,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32 => f.write_str("float32"),
            Self::F64 => f.write_str("float64"),
        }
    }
}

/// Memory layout of a multi-component field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Structure of arrays: component slowest, x fastest.
    #[default]
    Fzyx,
    /// Array of structures: component fastest.
    Zyxf,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fzyx => f.write_str("fzyx"),
            Self::Zyxf => f.write_str("zyxf"),
        }
    }
}

/// Shape of a field's per-cell data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// One value per cell.
    Scalar,
    /// `dims` values per cell.
    Vector {
        /// Number of components.
        dims: u32,
    },
    /// One value per staggered direction of `stencil`, each living on the
    /// face shared with the neighbour in that direction.
    StaggeredFlux {
        /// The stencil whose staggered half indexes the components.
        stencil: Stencil,
    },
}

impl FieldKind {
    /// Number of components per cell.
    pub fn components(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector { dims } => dims as usize,
            Self::StaggeredFlux { stencil } => stencil.staggered().len(),
        }
    }
}

/// A declared field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    element: ElementType,
    kind: FieldKind,
    layout: Layout,
    ghost_layers: u32,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            element: ElementType::default(),
            kind,
            layout: Layout::default(),
            ghost_layers: 1,
        }
    }

    /// A scalar field (`float32`, `fzyx`, one ghost layer).
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Scalar)
    }

    /// A vector field with `dims` components.
    pub fn vector(name: impl Into<String>, dims: u32) -> Self {
        Self::new(name, FieldKind::Vector { dims })
    }

    /// A staggered flux field over `stencil`.
    pub fn staggered_flux(name: impl Into<String>, stencil: Stencil) -> Self {
        Self::new(name, FieldKind::StaggeredFlux { stencil })
    }

    /// Override the element type.
    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = element;
        self
    }

    /// Override the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Override the number of ghost layers.
    pub fn with_ghost_layers(mut self, ghost_layers: u32) -> Self {
        self.ghost_layers = ghost_layers;
        self
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type.
    pub fn element(&self) -> ElementType {
        self.element
    }

    /// Per-cell shape.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Memory layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of ghost layers around the interior.
    pub fn ghost_layers(&self) -> u32 {
        self.ghost_layers
    }

    /// Number of components per cell.
    pub fn components(&self) -> usize {
        self.kind.components()
    }

    /// Access to component 0 at the current cell.
    pub fn center_access(&self) -> FieldAccess {
        FieldAccess::new(self.name.clone(), 0, [0; DIM])
    }

    /// Component 0 at the current cell.
    pub fn center(&self) -> Expr {
        Expr::Access(self.center_access())
    }

    /// Component 0 at `offset` from the current cell.
    pub fn neighbor(&self, offset: Offset) -> Expr {
        Expr::Access(FieldAccess::new(self.name.clone(), 0, offset))
    }

    /// Access to component `component` at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::ComponentOutOfRange`] if the field has fewer
    /// components.
    pub fn access(&self, component: usize, offset: Offset) -> Result<FieldAccess, GenError> {
        let components = self.components();
        if component >= components {
            return Err(GenError::ComponentOutOfRange {
                field: self.name.clone(),
                component,
                components,
            });
        }
        Ok(FieldAccess::new(self.name.clone(), component, offset))
    }

    /// Component `component` at the current cell.
    pub fn component(&self, component: usize) -> Result<Expr, GenError> {
        self.access(component, [0; DIM]).map(Expr::Access)
    }

    /// All components at `offset`.
    pub fn neighbor_vector(&self, offset: Offset) -> Vec<Expr> {
        (0..self.components())
            .map(|c| Expr::Access(FieldAccess::new(self.name.clone(), c, offset)))
            .collect()
    }

    /// All components at the current cell.
    pub fn center_vector(&self) -> Vec<Expr> {
        self.neighbor_vector([0; DIM])
    }

    /// The staggered directions of a flux field.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::NotStaggered`] for any other kind of field.
    pub fn staggered_directions(&self) -> Result<&'static [Direction], GenError> {
        match self.kind {
            FieldKind::StaggeredFlux { stencil } => Ok(stencil.staggered()),
            _ => Err(GenError::NotStaggered {
                field: self.name.clone(),
            }),
        }
    }

    /// The stencil of a flux field.
    pub fn stencil(&self) -> Result<Stencil, GenError> {
        match self.kind {
            FieldKind::StaggeredFlux { stencil } => Ok(stencil),
            _ => Err(GenError::NotStaggered {
                field: self.name.clone(),
            }),
        }
    }

    /// Access to the flux through face `k` of the cell at `offset`.
    pub fn staggered_access(&self, k: usize, offset: Offset) -> Result<FieldAccess, GenError> {
        self.staggered_directions()?;
        self.access(k, offset)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}[3D]", self.name, self.element)?;
        match self.kind {
            FieldKind::Scalar => Ok(()),
            FieldKind::Vector { dims } => write!(f, "({dims}) {}", self.layout),
            FieldKind::StaggeredFlux { stencil } => {
                write!(f, "({}) staggered {stencil} {}", self.components(), self.layout)
            }
        }
    }
}
