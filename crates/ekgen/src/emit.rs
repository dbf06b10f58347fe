//! Hand-off to an external sweep emitter.
//!
//! Turning an [`AssignmentCollection`](ekgen_core::AssignmentCollection)
//! into a compiled block-parallel sweep is the host engine's job. This
//! module only defines the seam.

use crate::catalog::{Kernel, KernelSet};
use crate::config::VectorizeInfo;

/// Consumer of generated kernels.
pub trait SweepEmitter {
    /// Error reported by the emitter.
    type Error;

    /// Emit one kernel.
    fn emit(&mut self, kernel: &Kernel, vectorize: &VectorizeInfo) -> Result<(), Self::Error>;
}

/// Hand every kernel of `set` to `emitter`, in generation order.
///
/// Stops at the first emitter error.
pub fn emit_all<E: SweepEmitter>(
    set: &KernelSet,
    vectorize: &VectorizeInfo,
    emitter: &mut E,
) -> Result<(), E::Error> {
    for kernel in set {
        log::debug!("emitting '{}'", kernel.name());
        emitter.emit(kernel, vectorize)?;
    }
    Ok(())
}
