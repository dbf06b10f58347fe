//! Volume-of-fluid advective flux.
//!
//! Each cell is treated as a box of fluid displaced by `v` during one
//! sweep. The flux through the face towards `x + n` is the part of the
//! displaced box of `x` that lands in `x + n`, minus the part of the box
//! of `x + n` that lands in `x`. A diagonal face only receives fluid moving
//! along all of its non-zero axes at once.

use ekgen_core::{
    Assignment, AssignmentCollection, Axis, Cond, Expr, Field, GenError, Offset, DIM,
};
use smallvec::SmallVec;

/// Fraction of a cell moving with velocity `vel` across the face towards
/// `sense · n`. Zero unless the motion along every non-zero axis of `n`
/// points that way.
fn face_transfer(vel: &[Expr], n: Offset, sense: f64) -> Expr {
    let mut gates: SmallVec<[Cond; DIM]> = SmallVec::new();
    let mut overlap: SmallVec<[Expr; DIM]> = SmallVec::new();
    for axis in Axis::ALL {
        let i = axis.index();
        if n[i] == 0 {
            overlap.push(1.0 - vel[i].clone().abs());
        } else {
            let along = sense * f64::from(n[i]) * vel[i].clone();
            gates.push(Cond::gt(along.clone(), Expr::zero()));
            overlap.push(along);
        }
    }
    Expr::piecewise(Cond::and(gates), Expr::mul(overlap), Expr::zero())
}

/// Advective flux of `c` under velocity `v`, one assignment per staggered
/// direction of `j`.
///
/// # Errors
///
/// Returns [`GenError::NotStaggered`] if `j` is not a flux field, or
/// [`GenError::ComponentOutOfRange`] if `v` has fewer than three components.
pub fn vof_advection(j: &Field, v: &Field, c: &Field) -> Result<AssignmentCollection, GenError> {
    let directions = j.staggered_directions()?;
    v.component(DIM - 1)?;
    let v0 = v.center_vector();
    let mut main = Vec::with_capacity(directions.len());
    for (k, dir) in directions.iter().enumerate() {
        let n = dir.offset;
        let v1 = v.neighbor_vector(n);
        let outgoing = face_transfer(&v0, n, 1.0) * c.center();
        let incoming = face_transfer(&v1, n, -1.0) * c.neighbor(n);
        main.push(Assignment::new(j.staggered_access(k, [0; DIM])?, outgoing - incoming));
    }
    AssignmentCollection::new(main)
}
