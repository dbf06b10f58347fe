//! Combined advection-diffusion flux kernel.

use crate::equation::diffusion_equation;
use crate::fvm::FiniteVolume;
use crate::vof::vof_advection;
use ekgen_core::{Assignment, AssignmentCollection, Expr, Field, GenError};

/// Sum advective and diffusive flux collections direction by direction.
///
/// Both must write the same staggered targets in the same order.
///
/// # Errors
///
/// Returns [`GenError::FluxCountMismatch`] if the collections differ in
/// length and [`GenError::FluxTargetMismatch`] at the first direction whose
/// targets disagree. Nothing is returned in either case.
pub fn combine_fluxes(
    advective: &AssignmentCollection,
    diffusive: &AssignmentCollection,
) -> Result<AssignmentCollection, GenError> {
    if advective.len() != diffusive.len() {
        return Err(GenError::FluxCountMismatch {
            advective: advective.len(),
            diffusive: diffusive.len(),
        });
    }
    let mut main = Vec::with_capacity(advective.len());
    for (direction, (adv, diff)) in advective.main().iter().zip(diffusive.main()).enumerate() {
        if adv.lhs != diff.lhs {
            return Err(GenError::FluxTargetMismatch {
                direction,
                advective: adv.lhs.to_string(),
                diffusive: diff.lhs.to_string(),
            });
        }
        main.push(Assignment::new(
            adv.lhs.clone(),
            adv.rhs.clone() + diff.rhs.clone(),
        ));
    }
    let subexpressions = advective
        .subexpressions()
        .iter()
        .chain(diffusive.subexpressions())
        .cloned()
        .collect();
    AssignmentCollection::new(main)?.with_subexpressions(subexpressions)
}

/// Flux of `c` through every staggered face of `j`: the discretized
/// diffusion and drift flux in potential `pot` plus the volume-of-fluid
/// advective flux in velocity `v`.
pub fn create_advection_diffusion_method(
    c: &Field,
    v: &Field,
    pot: &Field,
    j: &Field,
    d: &Expr,
    z: &Expr,
) -> Result<AssignmentCollection, GenError> {
    let flux = diffusion_equation(&c.center(), &pot.center(), d, z);
    let diffusive = FiniteVolume::new(c, flux).discrete_flux(j)?;
    let advective = vof_advection(j, v, c)?;
    let combined = combine_fluxes(&advective, &diffusive)?;
    log::debug!(
        "advection-diffusion flux of '{}': {} staggered directions",
        c.name(),
        combined.len()
    );
    Ok(combined)
}
