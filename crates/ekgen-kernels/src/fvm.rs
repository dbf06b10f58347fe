//! First-order finite-volume discretization on staggered faces.
//!
//! A flux `j` is stored per cell and staggered direction: `j[x]_k` is the
//! flux through the face shared by `x` and `x + n_k`, counted positive in
//! the direction of `n_k`. Discretizing a continuum flux at that face
//! replaces
//!
//! - a field access by the average of its values at `x` and `x + n`,
//! - a derivative along an axis by a difference across the face.
//!
//! The divergence sums inflow minus outflow over all faces and divides by
//! the effective face area `A0` of the stencil.

use ekgen_core::coord::{nonzero_axes, offset_add, offset_neg, offset_norm};
use ekgen_core::{
    Assignment, AssignmentCollection, Axis, Expr, Field, GenError, Offset, DIM,
};

/// A continuum flux of a cell-centred quantity, ready to be discretized.
#[derive(Clone, Debug, PartialEq)]
pub struct FiniteVolume {
    c: Field,
    flux: [Expr; DIM],
}

impl FiniteVolume {
    /// Wrap the continuum `flux` of `c`.
    pub fn new(c: &Field, flux: [Expr; DIM]) -> Self {
        Self {
            c: c.clone(),
            flux,
        }
    }

    /// The transported field.
    pub fn field(&self) -> &Field {
        &self.c
    }

    /// The continuum flux vector.
    pub fn flux(&self) -> &[Expr; DIM] {
        &self.flux
    }

    /// `flux · n`, summed over the non-zero components of `n`.
    fn projected(&self, n: Offset) -> Expr {
        Expr::add(
            nonzero_axes(n)
                .iter()
                .map(|axis| f64::from(n[axis.index()]) * self.flux[axis.index()].clone()),
        )
    }

    /// One assignment per staggered direction of `j`: the flux through
    /// that face, projected on the unit normal.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::NotStaggered`] if `j` is not a flux field.
    pub fn discrete_flux(&self, j: &Field) -> Result<AssignmentCollection, GenError> {
        let directions = j.staggered_directions()?;
        let mut main = Vec::with_capacity(directions.len());
        for (k, dir) in directions.iter().enumerate() {
            let n = dir.offset;
            let rhs = discretize_at_face(&self.projected(n), n) / offset_norm(n);
            main.push(Assignment::new(j.staggered_access(k, [0; DIM])?, rhs));
        }
        AssignmentCollection::new(main)
    }

    /// Concentration update from the divergence of the stored fluxes:
    /// `c ← c + (1/A0) Σ_k (j[x − n_k]_k − j[x]_k)`.
    ///
    /// On a periodic domain every face term appears once with each sign,
    /// so the update conserves the total of `c`.
    pub fn discrete_continuity(&self, j: &Field) -> Result<AssignmentCollection, GenError> {
        let stencil = j.stencil()?;
        let mut balance = Vec::with_capacity(stencil.staggered().len());
        for (k, dir) in stencil.staggered().iter().enumerate() {
            let inflow = Expr::Access(j.staggered_access(k, offset_neg(dir.offset))?);
            let outflow = Expr::Access(j.staggered_access(k, [0; DIM])?);
            balance.push(inflow - outflow);
        }
        let rhs = self.c.center() + Expr::add(balance) * (1.0 / stencil.face_area());
        AssignmentCollection::new(vec![Assignment::new(self.c.center_access(), rhs)])
    }
}

/// Evaluate `term` on the face between the current cell and `x + n`.
pub(crate) fn discretize_at_face(term: &Expr, n: Offset) -> Expr {
    term.transform(&mut |e| match e {
        Expr::Access(a) => Some((Expr::Access(a.shifted(n)) + Expr::Access(a.clone())) * 0.5),
        Expr::Diff(arg, axis) => Some(staggered_derivative(arg, *axis, n)),
        _ => None,
    })
}

/// Derivative along `axis` at the face towards `n`.
///
/// Along an axis the face normal has a component on, the difference across
/// the face is shared equally between the non-zero axes, so that the
/// projected derivative `Σ n_i ∂_i f` equals `f(x + n) − f(x)` exactly.
/// Along a tangential axis it is the mean of the central differences at
/// both cells.
fn staggered_derivative(arg: &Expr, axis: Axis, n: Offset) -> Expr {
    let along = n[axis.index()];
    if along != 0 {
        let shared = nonzero_axes(n).len() as f64;
        return (arg.shift(n) - arg.clone()) / (f64::from(along) * shared);
    }
    let e = axis.unit();
    let back = offset_neg(e);
    (arg.shift(offset_add(n, e)) - arg.shift(offset_add(n, back)) + arg.shift(e) - arg.shift(back))
        / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::diffusion_equation;
    use ekgen_core::{FieldAccess, Stencil};

    fn c_at(off: Offset) -> Expr {
        Expr::access(FieldAccess::new("c", 0, off))
    }

    #[test]
    fn face_average_of_access() {
        let avg = discretize_at_face(&c_at([0, 0, 0]), [-1, 0, 0]);
        assert_eq!(avg, (c_at([-1, 0, 0]) + c_at([0, 0, 0])) * 0.5);
    }

    #[test]
    fn normal_derivative_is_a_face_difference() {
        let d = discretize_at_face(&c_at([0, 0, 0]).diff(Axis::X), [-1, 0, 0]);
        assert_eq!(d, (c_at([-1, 0, 0]) - c_at([0, 0, 0])) / -1.0);
    }

    #[test]
    fn tangential_derivative_averages_central_differences() {
        let d = discretize_at_face(&c_at([0, 0, 0]).diff(Axis::Y), [-1, 0, 0]);
        let expected = (c_at([-1, 1, 0]) - c_at([-1, -1, 0]) + c_at([0, 1, 0]) - c_at([0, -1, 0]))
            / 4.0;
        assert_eq!(d, expected);
    }

    #[test]
    fn one_assignment_per_direction() {
        let c = Field::scalar("c");
        let flux =
            diffusion_equation(&c.center(), &Expr::zero(), &Expr::symbol("D"), &Expr::zero());
        let fvm = FiniteVolume::new(&c, flux);
        for stencil in [Stencil::D3Q7, Stencil::D3Q19, Stencil::D3Q27] {
            let j = Field::staggered_flux("j", stencil);
            let ac = fvm.discrete_flux(&j).unwrap();
            assert_eq!(ac.len(), stencil.staggered().len());
            for (k, a) in ac.main().iter().enumerate() {
                assert_eq!(a.lhs, FieldAccess::new("j", k, [0; 3]));
                assert!(!a.rhs.to_string().contains("Diff"));
            }
        }
    }

    #[test]
    fn rejects_non_staggered_target() {
        let c = Field::scalar("c");
        let fvm = FiniteVolume::new(&c, [Expr::zero(), Expr::zero(), Expr::zero()]);
        assert_eq!(
            fvm.discrete_flux(&c),
            Err(GenError::NotStaggered { field: "c".into() })
        );
        assert!(fvm.discrete_continuity(&c).is_err());
    }

    #[test]
    fn continuity_reads_both_faces() {
        let c = Field::scalar("c");
        let j = Field::staggered_flux("j", Stencil::D3Q7);
        let fvm = FiniteVolume::new(&c, [Expr::zero(), Expr::zero(), Expr::zero()]);
        let ac = fvm.discrete_continuity(&j).unwrap();
        assert_eq!(ac.len(), 1);
        let reads = ac.reads();
        assert!(reads.contains(&FieldAccess::new("j", 0, [1, 0, 0])));
        assert!(reads.contains(&FieldAccess::new("j", 0, [0, 0, 0])));
        assert!(reads.contains(&FieldAccess::new("j", 2, [0, 0, 1])));
        assert_eq!(ac.main()[0].lhs, c.center_access());
    }
}
