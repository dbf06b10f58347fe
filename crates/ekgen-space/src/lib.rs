//! Periodic 3D domains for ekgen kernels.
//!
//! Generated kernels iterate over the interior of a block plus some number
//! of ghost layers. This crate models that iteration space and the periodic
//! folding that maps a ghost cell back onto its interior image.
//!
//! - [`DomainExtent`]: interior size `L` per axis, with floor-modulo folding
//! - [`IterationRegion`]: interior plus ghost layers, in kernel loop order

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod region;

pub use domain::DomainExtent;
pub use error::SpaceError;
pub use region::IterationRegion;
