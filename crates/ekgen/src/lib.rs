//! ekgen: kernel generation for electrokinetic transport on structured grids.
//!
//! This is the top-level facade crate. It re-exports the public API of the
//! ekgen sub-crates and owns the kernel catalog: a [`GenerationConfig`]
//! goes in, a named [`KernelSet`] comes out, and a [`SweepEmitter`] turns
//! the kernels into whatever the host engine compiles.
//!
//! # Quick start
//!
//! ```rust
//! use ekgen::prelude::*;
//!
//! let config = GenerationConfig::default();
//! let kernels = generate_kernels(&config).unwrap();
//!
//! let flux = kernels.get("AdvectionDiffusion").unwrap();
//! assert!(flux.meta().staggered);
//! assert_eq!(flux.collection().len(), Stencil::D3Q19.staggered().len());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ekgen-core` | Stencils, fields, expressions, assignments, evaluation |
//! | [`space`] | `ekgen-space` | Domain extents, periodic folding, iteration regions |
//! | [`kernels`] | `ekgen-kernels` | Flux, continuity, fluctuation and reaction builders |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;

pub use catalog::{declare_fields, generate_kernels, Kernel, KernelMeta, KernelSet};
pub use config::{ConfigError, GenerationConfig, InstructionSet, VectorizeInfo};
pub use emit::{emit_all, SweepEmitter};
pub use error::GenerationError;

/// Core types: stencils, field declarations, expressions and assignments.
///
/// Re-export of `ekgen-core`. [`types::Expr`] is the expression tree every
/// builder produces; [`types::AssignmentCollection`] is the unit a kernel
/// is made of.
pub use ekgen_core as types;

/// Domain extents and iteration regions.
///
/// Re-export of `ekgen-space`. [`space::DomainExtent::fold`] is the numeric
/// counterpart of the folding applied to random keys.
pub use ekgen_space as space;

/// Kernel builders.
///
/// Re-export of `ekgen-kernels`. Use these directly to build kernels
/// outside the standard catalog.
pub use ekgen_kernels as kernels;

/// Common imports for typical ekgen usage.
///
/// ```rust
/// use ekgen::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ekgen_core::{
        Assignment, AssignmentCollection, ElementType, Expr, Field, FieldAccess, Layout, Stencil,
        Symbol,
    };

    // Errors
    pub use ekgen_core::{ExprError, GenError};

    // Space
    pub use ekgen_space::{DomainExtent, IterationRegion};

    // Kernel builders
    pub use ekgen_kernels::{
        add_fluctuations, add_ghostlayer_folding, create_advection_diffusion_method,
        create_reaction_method, EkFields,
    };

    // Catalog
    pub use crate::{
        emit_all, generate_kernels, ConfigError, GenerationConfig, GenerationError, Kernel,
        KernelSet, SweepEmitter, VectorizeInfo,
    };
}
