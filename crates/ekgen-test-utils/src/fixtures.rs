//! Reusable symbol bindings and field profiles.

use ekgen_core::{uniform_draw, Cell};
use ekgen_space::DomainExtent;
use indexmap::IndexMap;

use crate::MockFieldStore;

/// Symbol bindings from `(name, value)` pairs.
pub fn symbols(pairs: &[(&str, f64)]) -> IndexMap<String, f64> {
    pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}

/// Bindings for the transport kernels: `D`, `z`, time step, seed and the
/// domain extents `L_0..L_2`.
pub fn transport_symbols(
    d: f64,
    z: f64,
    time_step: u64,
    seed: u64,
    domain: DomainExtent,
) -> IndexMap<String, f64> {
    let [lx, ly, lz] = domain.extent().map(f64::from);
    symbols(&[
        ("D", d),
        ("z", z),
        ("time_step", time_step as f64),
        ("seed", seed as f64),
        ("L_0", lx),
        ("L_1", ly),
        ("L_2", lz),
    ])
}

/// Reproducible pseudo-random values in `[lo, hi)` for a field component.
pub fn random_profile(
    store: &mut MockFieldStore,
    field: &str,
    component: usize,
    seed: u64,
    lo: f64,
    hi: f64,
) {
    store.fill_with(field, component, |cell: Cell| {
        lo + (hi - lo) * uniform_draw(cell, component as u32, 0, seed)
    });
}

/// `c(x) = base + g · x` over the interior.
pub fn linear_profile(store: &mut MockFieldStore, field: &str, base: f64, gradient: [f64; 3]) {
    store.fill_with(field, 0, |[x, y, z]| {
        base + gradient[0] * x as f64 + gradient[1] * y as f64 + gradient[2] * z as f64
    });
}

/// A spatially uniform velocity field.
pub fn uniform_velocity(store: &mut MockFieldStore, field: &str, velocity: [f64; 3]) {
    for (component, &v) in velocity.iter().enumerate() {
        store.fill(field, component, v);
    }
}

/// Zero every component of a field.
pub fn zero_field(store: &mut MockFieldStore, field: &str, components: usize) {
    for component in 0..components {
        store.fill(field, component, 0.0);
    }
}
