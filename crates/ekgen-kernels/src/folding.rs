//! Periodic folding of random-stream keys.
//!
//! A sweep that includes ghost layers evaluates the noise of a ghost cell
//! too. Folding the loop counters inside every random key onto `[0, L)`
//! makes that draw identical to the one of the ghost's periodic image, so
//! both sides of a periodic boundary see the same face noise. Field
//! accesses and any other use of the counters are left alone.

use ekgen_core::{AssignmentCollection, Axis, Expr, Symbol, DIM};

/// The integer domain-extent parameters `L_0`, `L_1`, `L_2`.
pub fn domain_extent_symbols() -> [Expr; DIM] {
    Axis::ALL.map(|axis| Expr::Symbol(Symbol::integer(format!("L_{axis}"))))
}

/// Replace each loop counter `x_i` inside random keys by `x_i mod L_i`.
pub fn add_ghostlayer_folding(
    flux: &AssignmentCollection,
    extents: &[Expr; DIM],
) -> AssignmentCollection {
    flux.map_random_keys(&mut |draw| {
        draw.map_counters(|_, counter| {
            counter.transform(&mut |e| match e {
                Expr::Counter(axis) => {
                    Some(Expr::counter(*axis).rem(extents[axis.index()].clone()))
                }
                _ => None,
            })
        })
    })
}
