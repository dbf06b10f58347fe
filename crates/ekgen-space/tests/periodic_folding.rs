use ekgen_core::Axis;
use ekgen_space::{DomainExtent, IterationRegion};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fold_lands_in_interior(
        lx in 1u32..16, ly in 1u32..16, lz in 1u32..16,
        x in -64i64..64, y in -64i64..64, z in -64i64..64,
    ) {
        let d = DomainExtent::new([lx, ly, lz]).unwrap();
        prop_assert!(d.is_interior(d.fold_cell([x, y, z])));
    }

    #[test]
    fn fold_is_periodic(l in 1u32..16, x in -64i64..64, k in -4i64..4) {
        let d = DomainExtent::cubic(l).unwrap();
        prop_assert_eq!(d.fold(Axis::Y, x), d.fold(Axis::Y, x + k * i64::from(l)));
    }

    #[test]
    fn fold_is_identity_on_interior(l in 1u32..16, x in 0i64..16) {
        prop_assume!(x < i64::from(l));
        let d = DomainExtent::cubic(l).unwrap();
        prop_assert_eq!(d.fold(Axis::Z, x), x);
    }
}

#[test]
fn every_ghost_has_an_interior_image() {
    let r = IterationRegion::new(DomainExtent::new([3, 4, 5]).unwrap(), 1).unwrap();
    let mut ghosts = 0;
    for cell in r.cells() {
        let image = r.periodic_image(cell);
        assert!(r.domain().is_interior(image));
        if r.is_ghost(cell) {
            ghosts += 1;
            assert_ne!(image, cell);
        } else {
            assert_eq!(image, cell);
        }
    }
    assert_eq!(ghosts, r.cell_count() - r.domain().cell_count());
}
