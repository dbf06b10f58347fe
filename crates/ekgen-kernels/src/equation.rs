//! Continuum flux of a charged species.

use ekgen_core::{Axis, Expr, DIM};

/// Symbolic gradient `[∂x f, ∂y f, ∂z f]`.
pub fn grad(f: &Expr) -> [Expr; DIM] {
    Axis::ALL.map(|axis| f.clone().diff(axis))
}

/// Diffusion plus electromigration flux `−D·∇c − D·z·c·∇pot`.
///
/// `c` and `pot` are usually field centres; `d` and `z` may be symbols or
/// numbers. When `pot` is field-free (e.g. the constant `0`) the drift
/// term cancels structurally and only `−D·∇c` remains.
pub fn diffusion_equation(c: &Expr, pot: &Expr, d: &Expr, z: &Expr) -> [Expr; DIM] {
    let grad_c = grad(c);
    let grad_pot = grad(pot);
    Axis::ALL.map(|axis| {
        let i = axis.index();
        -(d.clone() * grad_c[i].clone())
            - d.clone() * z.clone() * c.clone() * grad_pot[i].clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ekgen_core::Field;

    #[test]
    fn drift_vanishes_without_potential() {
        let c = Field::scalar("c").center();
        let d = Expr::symbol("D");
        let flux = diffusion_equation(&c, &Expr::zero(), &d, &Expr::symbol("z"));
        for axis in Axis::ALL {
            assert_eq!(flux[axis.index()], -(d.clone() * c.clone().diff(axis)));
        }
    }

    #[test]
    fn drift_term_present_with_potential() {
        let c = Field::scalar("c").center();
        let phi = Field::scalar("Phi").center();
        let flux = diffusion_equation(&c, &phi, &Expr::symbol("D"), &Expr::symbol("z"));
        let Expr::Add(terms) = &flux[1] else {
            panic!("expected diffusion + drift, got {}", flux[1]);
        };
        assert_eq!(terms.len(), 2);
        assert!(flux[1].to_string().contains("Diff(Phi[0,0,0], 1)"));
    }

    #[test]
    fn zero_diffusivity_gives_zero_flux() {
        let c = Field::scalar("c").center();
        let phi = Field::scalar("Phi").center();
        let flux = diffusion_equation(&c, &phi, &Expr::zero(), &Expr::symbol("z"));
        assert!(flux.iter().all(Expr::is_zero));
    }
}
