//! Standard field declarations for the electrokinetic kernels.

use ekgen_core::{ElementType, Field, GenError, Layout, Stencil};

/// Concentration field name.
pub const CONCENTRATION: &str = "c";
/// Electrostatic potential field name.
pub const POTENTIAL: &str = "Phi";
/// Staggered flux field name.
pub const FLUX: &str = "j";
/// Charge density field name.
pub const CHARGE: &str = "q";
/// Advection velocity field name.
pub const VELOCITY: &str = "v";
/// Reaction flux field name.
pub const REACTION_FLUX: &str = "r";

/// The fields shared by the transport, charge and reaction kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EkFields {
    /// Species concentration.
    pub c: Field,
    /// Electrostatic potential.
    pub phi: Field,
    /// Staggered flux of the concentration.
    pub j: Field,
    /// Charge density.
    pub q: Field,
    /// Advection velocity, three components.
    pub v: Field,
    /// Reaction flux into the concentration.
    pub r: Field,
}

/// Concentration and reaction flux fields of one species in a
/// multi-species reaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Species {
    /// Concentration `c_i`.
    pub c: Field,
    /// Reaction flux `r_i`.
    pub r: Field,
}

impl EkFields {
    /// Declare every field with one element type, one layout, and one
    /// ghost layer.
    pub fn new(stencil: Stencil, element: ElementType, layout: Layout) -> Self {
        let declare = |f: Field| f.with_element(element).with_layout(layout);
        Self {
            c: declare(Field::scalar(CONCENTRATION)),
            phi: declare(Field::scalar(POTENTIAL)),
            j: declare(Field::staggered_flux(FLUX, stencil)),
            q: declare(Field::scalar(CHARGE)),
            v: declare(Field::vector(VELOCITY, 3)),
            r: declare(Field::scalar(REACTION_FLUX)),
        }
    }

    /// Species `index` (1-based) of a multi-species reaction.
    pub fn species(&self, index: usize) -> Species {
        let like = |f: Field| f.with_element(self.c.element()).with_layout(self.c.layout());
        Species {
            c: like(Field::scalar(format!("{CONCENTRATION}_{index}"))),
            r: like(Field::scalar(format!("{REACTION_FLUX}_{index}"))),
        }
    }

    /// The stencil of the flux field.
    pub fn stencil(&self) -> Result<Stencil, GenError> {
        self.j.stencil()
    }
}

impl Default for EkFields {
    fn default() -> Self {
        Self::new(Stencil::D3Q19, ElementType::F32, Layout::Fzyx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_declarations() {
        let f = EkFields::default();
        assert_eq!(f.c.to_string(), "c : float32[3D]");
        assert_eq!(f.j.components(), 9);
        assert_eq!(f.v.components(), 3);
        assert_eq!(f.stencil(), Ok(Stencil::D3Q19));
    }

    #[test]
    fn species_fields_follow_concentration() {
        let f = EkFields::new(Stencil::D3Q27, ElementType::F64, Layout::Zyxf);
        let s = f.species(3);
        assert_eq!(s.c.name(), "c_3");
        assert_eq!(s.r.name(), "r_3");
        assert_eq!(s.c.element(), ElementType::F64);
        assert_eq!(s.r.layout(), Layout::Zyxf);
    }
}
