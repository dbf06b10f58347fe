//! Kernel builders for electrokinetic transport.
//!
//! Each builder takes field declarations and physical parameters and
//! returns an [`AssignmentCollection`](ekgen_core::AssignmentCollection)
//! describing one sweep. Nothing here touches memory or runs a kernel.
//!
//! # Pipeline
//!
//! 1. [`diffusion_equation`] builds the continuum diffusion + drift flux.
//! 2. [`create_advection_diffusion_method`] discretizes it per staggered
//!    face and adds the volume-of-fluid advective flux.
//! 3. [`add_fluctuations`] optionally injects thermal noise.
//! 4. [`add_ghostlayer_folding`] makes the noise periodic across ghost layers.
//!
//! Independently, [`continuity_equation`] updates concentrations from the
//! fluxes, [`gather_charges`] accumulates charge density, and
//! [`create_reaction_method`] with [`reaction_continuity`] handle
//! mass-action chemistry.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod advection_diffusion;
pub mod continuity;
pub mod equation;
pub mod fields;
pub mod fluctuation;
pub mod folding;
pub mod fvm;
pub mod reaction;
pub mod vof;

pub use advection_diffusion::{combine_fluxes, create_advection_diffusion_method};
pub use continuity::{continuity_equation, gather_charges, reaction_continuity};
pub use equation::{diffusion_equation, grad};
pub use fields::{EkFields, Species};
pub use fluctuation::{add_fluctuations, fluctuation_amplitude, stencil_factor};
pub use folding::{add_ghostlayer_folding, domain_extent_symbols};
pub use fvm::FiniteVolume;
pub use reaction::{create_reaction_method, reaction_coefficients, reaction_orders};
pub use vof::vof_advection;
