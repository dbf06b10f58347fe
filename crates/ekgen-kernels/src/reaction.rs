//! Mass-action reaction kinetics.

use ekgen_core::{Assignment, AssignmentCollection, Expr, Field, GenError, Symbol};
use std::iter;

/// Reaction fluxes `r_i ← rate · Π_k c_k^{order_k} · coef_i` for every
/// species `i`.
///
/// The species count is whatever the slices hold; callers generate one
/// kernel per count they need.
///
/// # Errors
///
/// Returns [`GenError::NoSpecies`] for empty input and
/// [`GenError::SpeciesMismatch`] if the slices differ in length.
pub fn create_reaction_method(
    c_fields: &[Field],
    r_flux_fields: &[Field],
    rate: &Expr,
    coefs: &[Expr],
    orders: &[Expr],
) -> Result<AssignmentCollection, GenError> {
    let species = c_fields.len();
    if species == 0 {
        return Err(GenError::NoSpecies);
    }
    if r_flux_fields.len() != species || coefs.len() != species || orders.len() != species {
        return Err(GenError::SpeciesMismatch {
            species,
            flux_fields: r_flux_fields.len(),
            coefficients: coefs.len(),
            orders: orders.len(),
        });
    }

    let reaction = Expr::mul(
        iter::once(rate.clone()).chain(
            c_fields
                .iter()
                .zip(orders)
                .map(|(c, order)| Expr::pow(c.center(), order.clone())),
        ),
    );
    let main = r_flux_fields
        .iter()
        .zip(coefs)
        .map(|(r, coef)| Assignment::new(r.center_access(), reaction.clone() * coef.clone()))
        .collect();
    AssignmentCollection::new(main)
}

/// Stoichiometric coefficient parameters `n_0 .. n_{species-1}`.
pub fn reaction_coefficients(species: usize) -> Vec<Expr> {
    (0..species)
        .map(|i| Expr::Symbol(Symbol::real(format!("n_{i}"))))
        .collect()
}

/// Reaction order parameters `O_0 .. O_{species-1}`.
pub fn reaction_orders(species: usize) -> Vec<Expr> {
    (0..species)
        .map(|i| Expr::Symbol(Symbol::real(format!("O_{i}"))))
        .collect()
}
