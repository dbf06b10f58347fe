//! Top-level error type for kernel generation.

use std::error::Error;
use std::fmt;

use ekgen_core::GenError;

use crate::config::ConfigError;

/// Errors returned by [`generate_kernels`](crate::generate_kernels).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A kernel builder rejected its inputs.
    Build {
        /// Name of the kernel being built.
        kernel: String,
        /// The builder's error.
        source: GenError,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Build { kernel, source } => write!(f, "kernel '{kernel}': {source}"),
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Build { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for GenerationError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
