//! Generation configuration, validation, and error types.
//!
//! [`GenerationConfig`] fixes everything the kernel catalog needs besides
//! the physics: stencil, storage of the generated fields, which species
//! counts get a reaction kernel, and the vectorization hints handed to the
//! sweep emitter. [`validate()`](GenerationConfig::validate) checks it
//! before any kernel is built.

use std::error::Error;
use std::fmt;
use std::ops::RangeInclusive;

use ekgen_core::{ElementType, Layout, Stencil};

// ── VectorizeInfo ──────────────────────────────────────────────────

/// SIMD instruction set targeted by the emitted sweeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstructionSet {
    /// 128-bit SSE.
    Sse,
    /// 256-bit AVX.
    #[default]
    Avx,
    /// 512-bit AVX-512.
    Avx512,
    /// 128-bit ARM NEON.
    Neon,
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sse => f.write_str("sse"),
            Self::Avx => f.write_str("avx"),
            Self::Avx512 => f.write_str("avx512"),
            Self::Neon => f.write_str("neon"),
        }
    }
}

/// CPU vectorization hints.
///
/// These never change the generated assignments; they are passed through
/// to the [`SweepEmitter`](crate::emit::SweepEmitter) unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorizeInfo {
    /// Target instruction set. Default: AVX.
    pub instruction_set: InstructionSet,
    /// The innermost loop walks unit-stride memory. Default: true.
    pub assume_inner_stride_one: bool,
    /// Field base pointers are vector-aligned. Default: true.
    pub assume_aligned: bool,
    /// Rows are padded to a whole number of vectors. Default: true.
    pub assume_sufficient_line_padding: bool,
}

impl Default for VectorizeInfo {
    fn default() -> Self {
        Self {
            instruction_set: InstructionSet::Avx,
            assume_inner_stride_one: true,
            assume_aligned: true,
            assume_sufficient_line_padding: true,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`GenerationConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Fields need at least one ghost layer for the staggered sweeps.
    GhostLayers {
        /// The configured depth.
        configured: u32,
    },
    /// The species range is empty or starts at zero.
    InvalidSpeciesRange {
        /// First species count.
        start: usize,
        /// Last species count.
        end: usize,
    },
    /// Unit inner stride was promised for a layout whose innermost
    /// dimension is the component index.
    InnerStrideWithZyxf,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GhostLayers { configured } => {
                write!(f, "ghost_layers must be at least 1, got {configured}")
            }
            Self::InvalidSpeciesRange { start, end } => {
                write!(f, "species_counts {start}..={end} must be non-empty and start at 1 or more")
            }
            Self::InnerStrideWithZyxf => write!(
                f,
                "assume_inner_stride_one requires the {} layout, got {}",
                Layout::Fzyx,
                Layout::Zyxf
            ),
        }
    }
}

impl Error for ConfigError {}

// ── GenerationConfig ───────────────────────────────────────────────

/// Complete configuration for [`generate_kernels`](crate::generate_kernels).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Neighbour stencil of the flux field. Default: D3Q19.
    pub stencil: Stencil,
    /// Element type of every generated field. Default: `float32`.
    pub element: ElementType,
    /// Memory layout of every generated field. Default: `fzyx`.
    pub layout: Layout,
    /// Ghost-layer depth of every generated field. Default: 1. Minimum: 1.
    pub ghost_layers: u32,
    /// Species counts that get a `ReactionFluxSpecies{N}` kernel.
    /// Default: `1..=5`.
    pub species_counts: RangeInclusive<usize>,
    /// Hints for the sweep emitter.
    pub vectorize: VectorizeInfo,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            stencil: Stencil::D3Q19,
            element: ElementType::F32,
            layout: Layout::Fzyx,
            ghost_layers: 1,
            species_counts: 1..=5,
            vectorize: VectorizeInfo::default(),
        }
    }
}

impl GenerationConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ghost_layers == 0 {
            return Err(ConfigError::GhostLayers {
                configured: self.ghost_layers,
            });
        }
        let (start, end) = (*self.species_counts.start(), *self.species_counts.end());
        if start == 0 || self.species_counts.is_empty() {
            return Err(ConfigError::InvalidSpeciesRange { start, end });
        }
        if self.layout == Layout::Zyxf && self.vectorize.assume_inner_stride_one {
            return Err(ConfigError::InnerStrideWithZyxf);
        }
        Ok(())
    }
}
