//! Cell-centred update kernels.

use crate::equation::diffusion_equation;
use crate::fvm::FiniteVolume;
use ekgen_core::{Assignment, AssignmentCollection, Expr, Field, GenError};

/// Concentration update from the divergence of the flux field `j`.
///
/// See [`FiniteVolume::discrete_continuity`].
pub fn continuity_equation(
    c: &Field,
    pot: &Field,
    j: &Field,
    d: &Expr,
    z: &Expr,
) -> Result<AssignmentCollection, GenError> {
    FiniteVolume::new(c, diffusion_equation(&c.center(), &pot.center(), d, z))
        .discrete_continuity(j)
}

/// Charge accumulation `q ← q + z·c`.
pub fn gather_charges(q: &Field, c: &Field, z: &Expr) -> AssignmentCollection {
    AssignmentCollection::single(Assignment::new(
        q.center_access(),
        q.center() + z.clone() * c.center(),
    ))
}

/// Reaction update `c ← c + r`.
pub fn reaction_continuity(c: &Field, r: &Field) -> AssignmentCollection {
    AssignmentCollection::single(Assignment::new(c.center_access(), c.center() + r.center()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_charges_shape() {
        let ac = gather_charges(&Field::scalar("q"), &Field::scalar("c"), &Expr::symbol("z"));
        assert_eq!(ac.to_string(), "q[0,0,0] ← q[0,0,0] + z*c[0,0,0]\n");
    }

    #[test]
    fn reaction_continuity_shape() {
        let ac = reaction_continuity(&Field::scalar("c"), &Field::scalar("r"));
        assert_eq!(ac.len(), 1);
        assert_eq!(ac.main()[0].rhs, Field::scalar("c").center() + Field::scalar("r").center());
    }
}
