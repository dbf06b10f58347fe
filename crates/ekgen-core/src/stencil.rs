//! Neighbour stencils and their staggered halves.
//!
//! Direction names follow the compass convention: `W`/`E` along x,
//! `S`/`N` along y, `B`/`T` along z. The staggered half of a stencil keeps,
//! for each `±n` pair, the offset whose first non-zero component is
//! negative. Flux fields store one value per staggered direction; the
//! value at cell `x` is the flux through the face shared with `x + n`.

use crate::coord::{offset_norm, Offset, DIM};
use crate::error::GenError;
use std::fmt;

/// A named neighbour direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Compass name, e.g. `"SW"`.
    pub name: &'static str,
    /// Relative offset of the neighbour.
    pub offset: Offset,
}

impl Direction {
    const fn new(name: &'static str, offset: Offset) -> Self {
        Self { name, offset }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// All 26 neighbours. D3Q7 and D3Q19 are prefixes of this table.
const DIRECTIONS: [Direction; 26] = [
    Direction::new("N", [0, 1, 0]),
    Direction::new("S", [0, -1, 0]),
    Direction::new("W", [-1, 0, 0]),
    Direction::new("E", [1, 0, 0]),
    Direction::new("T", [0, 0, 1]),
    Direction::new("B", [0, 0, -1]),
    Direction::new("NW", [-1, 1, 0]),
    Direction::new("NE", [1, 1, 0]),
    Direction::new("SW", [-1, -1, 0]),
    Direction::new("SE", [1, -1, 0]),
    Direction::new("TN", [0, 1, 1]),
    Direction::new("TS", [0, -1, 1]),
    Direction::new("TW", [-1, 0, 1]),
    Direction::new("TE", [1, 0, 1]),
    Direction::new("BN", [0, 1, -1]),
    Direction::new("BS", [0, -1, -1]),
    Direction::new("BW", [-1, 0, -1]),
    Direction::new("BE", [1, 0, -1]),
    Direction::new("TNE", [1, 1, 1]),
    Direction::new("TNW", [-1, 1, 1]),
    Direction::new("TSE", [1, -1, 1]),
    Direction::new("TSW", [-1, -1, 1]),
    Direction::new("BNE", [1, 1, -1]),
    Direction::new("BNW", [-1, 1, -1]),
    Direction::new("BSE", [1, -1, -1]),
    Direction::new("BSW", [-1, -1, -1]),
];

/// Staggered halves. Again each smaller stencil is a prefix.
const STAGGERED: [Direction; 13] = [
    Direction::new("W", [-1, 0, 0]),
    Direction::new("S", [0, -1, 0]),
    Direction::new("B", [0, 0, -1]),
    Direction::new("SW", [-1, -1, 0]),
    Direction::new("NW", [-1, 1, 0]),
    Direction::new("BW", [-1, 0, -1]),
    Direction::new("TW", [-1, 0, 1]),
    Direction::new("BS", [0, -1, -1]),
    Direction::new("TS", [0, -1, 1]),
    Direction::new("BSW", [-1, -1, -1]),
    Direction::new("BNW", [-1, 1, -1]),
    Direction::new("TSW", [-1, -1, 1]),
    Direction::new("TNW", [-1, 1, 1]),
];

/// A three-dimensional neighbour stencil.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stencil {
    /// Face neighbours only (6 directions).
    D3Q7,
    /// Face and edge neighbours (18 directions).
    D3Q19,
    /// Face, edge and corner neighbours (26 directions).
    D3Q27,
}

impl Stencil {
    /// Look up a stencil by its number of neighbours (6, 18 or 26).
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnsupportedStencil`] for any other arity.
    pub fn from_arity(arity: usize) -> Result<Self, GenError> {
        match arity {
            6 => Ok(Self::D3Q7),
            18 => Ok(Self::D3Q19),
            26 => Ok(Self::D3Q27),
            _ => Err(GenError::UnsupportedStencil { arity }),
        }
    }

    /// Number of neighbour directions, excluding the centre.
    pub fn arity(self) -> usize {
        match self {
            Self::D3Q7 => 6,
            Self::D3Q19 => 18,
            Self::D3Q27 => 26,
        }
    }

    /// Number of directions including the centre (the `Q` in `D3Qn`).
    pub fn q(self) -> usize {
        self.arity() + 1
    }

    /// All neighbour directions.
    pub fn directions(self) -> &'static [Direction] {
        &DIRECTIONS[..self.arity()]
    }

    /// The staggered half: one direction per `±n` pair.
    pub fn staggered(self) -> &'static [Direction] {
        &STAGGERED[..self.arity() / 2]
    }

    /// Index of `offset` in the staggered half, if present.
    pub fn staggered_index(self, offset: Offset) -> Option<usize> {
        self.staggered().iter().position(|d| d.offset == offset)
    }

    /// Effective face area `A0 = Σ|n| / 3` over the staggered directions.
    ///
    /// Dividing a sum of face fluxes by `A0` gives an isotropic
    /// finite-volume divergence independent of the connectivity.
    pub fn face_area(self) -> f64 {
        let total: f64 = self.staggered().iter().map(|d| offset_norm(d.offset)).sum();
        total / DIM as f64
    }

    /// Noise normalisation `sqrt(1 / A0)` in closed form.
    pub fn noise_factor(self) -> f64 {
        let sqrt2 = std::f64::consts::SQRT_2;
        match self {
            Self::D3Q7 => 1.0,
            Self::D3Q19 => (1.0 / (1.0 + 2.0 * sqrt2)).sqrt(),
            Self::D3Q27 => (1.0 / (1.0 + 2.0 * sqrt2 + 4.0 / 3.0 * 3f64.sqrt())).sqrt(),
        }
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D3Q{}", self.q())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::offset_neg;

    const ALL: [Stencil; 3] = [Stencil::D3Q7, Stencil::D3Q19, Stencil::D3Q27];

    #[test]
    fn arity_roundtrip() {
        for s in ALL {
            assert_eq!(Stencil::from_arity(s.arity()), Ok(s));
        }
        assert_eq!(
            Stencil::from_arity(19),
            Err(GenError::UnsupportedStencil { arity: 19 })
        );
    }

    #[test]
    fn staggered_is_half_and_first_nonzero_negative() {
        for s in ALL {
            assert_eq!(s.staggered().len() * 2, s.arity());
            for d in s.staggered() {
                let first = d.offset.iter().find(|&&c| c != 0).copied();
                assert_eq!(first, Some(-1), "{d} in {s}");
                assert!(s.directions().iter().any(|e| e.offset == d.offset));
                assert!(s
                    .directions()
                    .iter()
                    .any(|e| e.offset == offset_neg(d.offset)));
            }
        }
    }

    #[test]
    fn directions_are_unique() {
        for s in ALL {
            let dirs = s.directions();
            for (i, a) in dirs.iter().enumerate() {
                for b in &dirs[i + 1..] {
                    assert_ne!(a.offset, b.offset);
                }
            }
        }
    }

    #[test]
    fn noise_factor_matches_face_area() {
        for s in ALL {
            let from_area = (1.0 / s.face_area()).sqrt();
            assert!((s.noise_factor() - from_area).abs() < 1e-12, "{s}");
        }
    }

    #[test]
    fn staggered_index_lookup() {
        assert_eq!(Stencil::D3Q19.staggered_index([-1, 0, 0]), Some(0));
        assert_eq!(Stencil::D3Q19.staggered_index([0, -1, 1]), Some(8));
        assert_eq!(Stencil::D3Q19.staggered_index([1, 0, 0]), None);
        assert_eq!(Stencil::D3Q7.staggered_index([-1, -1, 0]), None);
    }

    #[test]
    fn display_uses_q() {
        assert_eq!(Stencil::D3Q19.to_string(), "D3Q19");
    }
}
