//! Thermal fluctuations of staggered fluxes.
//!
//! Every face flux receives an independent, zero-mean noise term whose
//! variance follows the fluctuation-dissipation relation `2·ρ·D`, scaled by
//! the face's direction length and by a stencil-wide normalisation so the
//! total injected variance per cell does not depend on connectivity.

use ekgen_core::coord::nonzero_axes;
use ekgen_core::{
    Assignment, AssignmentCollection, Expr, Field, GenError, Offset, RandomDraw, Stencil,
    SubAssignment, Symbol, DIM,
};

/// Name of the integer time-step parameter keying the random stream.
pub const TIME_STEP: &str = "time_step";
/// Name of the integer seed parameter keying the random stream.
pub const SEED: &str = "seed";

/// Noise normalisation for a stencil with `arity` neighbours.
///
/// Arities other than 6, 18 and 26 fall back to the 18-neighbour value
/// with a warning. Prefer [`Stencil::noise_factor`] when the stencil is
/// known.
pub fn stencil_factor(arity: usize) -> f64 {
    match Stencil::from_arity(arity) {
        Ok(stencil) => stencil.noise_factor(),
        Err(err) => {
            log::warn!("{err}; using the {} noise normalisation", Stencil::D3Q19);
            Stencil::D3Q19.noise_factor()
        }
    }
}

/// Noise amplitude for the face towards `n`.
///
/// The local density is the face average of `c`, damped by
/// `max(0, min(1, c[n])·min(1, c[0]))` so the noise cannot drive an empty
/// cell negative. The amplitude is `sqrt(max(0, 2·ρ·D)) · sqrt(1/|n|₀) ·
/// factor`, where `|n|₀` is the square root of the number of non-zero
/// components of `n`. It is never negative and is exactly zero for `D = 0`.
pub fn fluctuation_amplitude(c: &Field, n: Offset, d: &Expr, factor: f64) -> Expr {
    let center = c.center();
    let neighbor = c.neighbor(n);
    let damping = (neighbor.clone().min(1.0) * center.clone().min(1.0)).max(0.0);
    let density = (neighbor + center) * 0.5 * damping;
    let length = (nonzero_axes(n).len() as f64).sqrt();
    (2.0 * density * d.clone()).max(0.0).sqrt() * ((1.0 / length).sqrt() * factor)
}

/// Add thermal noise to every face flux of `flux`.
///
/// Direction `k` draws one uniform number `xi_k` per cell, keyed by the
/// loop counters, channel `k` and the [`TIME_STEP`] and [`SEED`]
/// parameters. The draw is rescaled to zero mean and unit variance,
/// `2·(xi_k − 0.5)·sqrt(3)`, and multiplied by the amplitude.
///
/// # Errors
///
/// Returns [`GenError::NotStaggered`] if `j` is not a flux field,
/// [`GenError::DirectionCountMismatch`] if `flux` does not hold one
/// assignment per staggered direction of `j`, and
/// [`GenError::FaceTargetMismatch`] if assignment `k` does not write
/// component `k` of `j` at the current cell.
pub fn add_fluctuations(
    flux: &AssignmentCollection,
    c: &Field,
    j: &Field,
    d: &Expr,
    factor: f64,
) -> Result<AssignmentCollection, GenError> {
    let directions = j.staggered_directions()?;
    if flux.len() != directions.len() {
        return Err(GenError::DirectionCountMismatch {
            field: j.name().to_string(),
            directions: directions.len(),
            assignments: flux.len(),
        });
    }

    let time_step = Expr::Symbol(Symbol::integer(TIME_STEP));
    let seed = Expr::Symbol(Symbol::integer(SEED));
    let mut subexpressions = flux.subexpressions().to_vec();
    let mut main = Vec::with_capacity(flux.len());
    for (k, (assignment, dir)) in flux.main().iter().zip(directions).enumerate() {
        let face = j.staggered_access(k, [0; DIM])?;
        if assignment.lhs != face {
            return Err(GenError::FaceTargetMismatch {
                direction: k,
                expected: face.to_string(),
                found: assignment.lhs.to_string(),
            });
        }
        let xi = Symbol::real(format!("xi_{k}"));
        let draw = RandomDraw::at_loop_counters(k as u32, time_step.clone(), seed.clone());
        subexpressions.push(SubAssignment::new(xi.clone(), Expr::random(draw)));

        let rescaled = (Expr::Symbol(xi) - 0.5) * (2.0 * 3f64.sqrt());
        let noise = fluctuation_amplitude(c, dir.offset, d, factor) * rescaled;
        main.push(Assignment::new(
            assignment.lhs.clone(),
            assignment.rhs.clone() + noise,
        ));
    }
    AssignmentCollection::new(main)?.with_subexpressions(subexpressions)
}
