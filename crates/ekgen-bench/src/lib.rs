//! Benchmark profiles for the ekgen kernel generator.
//!
//! - [`reference_config`]: the default catalog (D3Q19, species 1..=5)
//! - [`stress_config`]: D3Q27 with reaction kernels up to eight species
//! - [`reference_domain`]: 16x16x16 periodic domain for evaluation benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ekgen::GenerationConfig;
use ekgen_core::{ElementType, Stencil};
use ekgen_space::{DomainExtent, SpaceError};

/// The catalog as generated for a production build.
pub fn reference_config() -> GenerationConfig {
    GenerationConfig::default()
}

/// Largest stencil, double precision and a wider species range.
pub fn stress_config() -> GenerationConfig {
    GenerationConfig {
        stencil: Stencil::D3Q27,
        element: ElementType::F64,
        species_counts: 1..=8,
        ..GenerationConfig::default()
    }
}

/// A 16x16x16 domain (4096 interior cells).
pub fn reference_domain() -> Result<DomainExtent, SpaceError> {
    DomainExtent::cubic(16)
}
