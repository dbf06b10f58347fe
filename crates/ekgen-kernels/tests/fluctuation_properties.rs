use ekgen_core::{Cell, Env, Expr, Field, FieldValues, Stencil};
use ekgen_kernels::{
    add_fluctuations, add_ghostlayer_folding, create_advection_diffusion_method,
    domain_extent_symbols, fluctuation_amplitude, stencil_factor, EkFields,
};
use ekgen_space::{DomainExtent, IterationRegion};
use ekgen_test_utils::fixtures::{random_profile, transport_symbols, zero_field};
use ekgen_test_utils::{run_sweep, MockFieldStore};
use proptest::prelude::*;

/// `c` at the origin and a different value everywhere else.
struct Pair {
    center: f64,
    neighbor: f64,
}

impl FieldValues for Pair {
    fn value(&self, _: &str, _: usize, cell: Cell) -> Option<f64> {
        Some(if cell == [0, 0, 0] { self.center } else { self.neighbor })
    }
}

fn amplitude(center: f64, neighbor: f64, d: f64, n: [i32; 3]) -> f64 {
    let c = Field::scalar("c");
    let amp = fluctuation_amplitude(&c, n, &Expr::symbol("D"), stencil_factor(18));
    let values = Pair { center, neighbor };
    amp.evaluate(&Env::new(&values).with_symbol("D", d)).unwrap()
}

proptest! {
    #[test]
    fn amplitude_vanishes_without_diffusion(
        center in -2.0f64..2.0,
        neighbor in -2.0f64..2.0,
    ) {
        prop_assert_eq!(amplitude(center, neighbor, 0.0, [-1, 0, 0]), 0.0);
        prop_assert_eq!(amplitude(center, neighbor, 0.0, [-1, 1, -1]), 0.0);
    }

    #[test]
    fn amplitude_is_never_negative(
        center in -2.0f64..2.0,
        neighbor in -2.0f64..2.0,
        d in 0.0f64..1.0,
    ) {
        let a = amplitude(center, neighbor, d, [0, -1, 1]);
        prop_assert!(a >= 0.0, "amplitude {}", a);
    }

    #[test]
    fn amplitude_vanishes_for_empty_cells(neighbor in 0.0f64..2.0, d in 0.0f64..1.0) {
        prop_assert_eq!(amplitude(0.0, neighbor, d, [-1, 0, 0]), 0.0);
    }
}

#[test]
fn amplitude_matches_closed_form() {
    // Both densities inside [0, 1]: ρ = (a + b)/2 · a·b.
    let (a, b, d): (f64, f64, f64) = (0.4, 0.8, 0.3);
    let rho = (a + b) / 2.0 * a * b;
    let expected = (2.0 * rho * d).sqrt() * (1.0 / 2f64.sqrt()).sqrt() * stencil_factor(18);
    let got = amplitude(a, b, d, [-1, -1, 0]);
    assert!((got - expected).abs() < 1e-12, "{got} vs {expected}");
}

fn noisy_kernel(fields: &EkFields, fold: bool) -> ekgen_core::AssignmentCollection {
    let d = Expr::symbol("D");
    let flux = create_advection_diffusion_method(
        &fields.c,
        &fields.v,
        &fields.phi,
        &fields.j,
        &d,
        &Expr::symbol("z"),
    )
    .unwrap();
    let noisy = add_fluctuations(&flux, &fields.c, &fields.j, &d, stencil_factor(18)).unwrap();
    if fold {
        add_ghostlayer_folding(&noisy, &domain_extent_symbols())
    } else {
        noisy
    }
}

fn periodic_store(fields: &EkFields, domain: DomainExtent) -> MockFieldStore {
    let mut store = MockFieldStore::new(domain);
    random_profile(&mut store, fields.c.name(), 0, 3, 0.1, 0.9);
    random_profile(&mut store, fields.phi.name(), 0, 4, -0.2, 0.2);
    for component in 0..3 {
        random_profile(&mut store, fields.v.name(), component, 5, -0.05, 0.05);
    }
    zero_field(&mut store, fields.j.name(), fields.j.components());
    store
}

#[test]
fn folded_ghost_cells_match_their_periodic_image() {
    let fields = EkFields::new(Stencil::D3Q19, Default::default(), Default::default());
    let domain = DomainExtent::new([4, 5, 3]).unwrap();
    let region = IterationRegion::new(domain, 1).unwrap();
    let symbols = transport_symbols(0.1, 1.0, 3, 99, domain);
    let store = periodic_store(&fields, domain);
    let kernel = noisy_kernel(&fields, true);

    let mut ghosts = 0;
    for cell in region.cells().filter(|&c| region.is_ghost(c)) {
        let image = region.periodic_image(cell);
        let at_ghost = kernel.evaluate_at(&store, &symbols, cell).unwrap();
        let at_image = kernel.evaluate_at(&store, &symbols, image).unwrap();
        for ((_, g), (_, i)) in at_ghost.iter().zip(&at_image) {
            assert_eq!(g.to_bits(), i.to_bits(), "ghost {cell:?} vs image {image:?}");
        }
        ghosts += 1;
    }
    assert_eq!(ghosts, region.cell_count() - domain.cell_count());
}

#[test]
fn unfolded_ghost_cells_draw_different_noise() {
    let fields = EkFields::new(Stencil::D3Q19, Default::default(), Default::default());
    let domain = DomainExtent::cubic(4).unwrap();
    let symbols = transport_symbols(0.1, 1.0, 3, 99, domain);
    let store = periodic_store(&fields, domain);
    let kernel = noisy_kernel(&fields, false);

    let at_ghost = kernel.evaluate_at(&store, &symbols, [-1, 1, 1]).unwrap();
    let at_image = kernel.evaluate_at(&store, &symbols, [3, 1, 1]).unwrap();
    assert!(at_ghost.iter().zip(&at_image).any(|((_, g), (_, i))| g != i));
}

#[test]
fn noise_depends_on_step_and_seed() {
    let fields = EkFields::default();
    let domain = DomainExtent::cubic(3).unwrap();
    let store = periodic_store(&fields, domain);
    let kernel = noisy_kernel(&fields, true);
    let sweep = |step, seed| {
        let symbols = transport_symbols(0.1, 1.0, step, seed, domain);
        run_sweep(&kernel, &store, &symbols, [[1, 1, 1]])
            .unwrap()
            .get("j", 0, [1, 1, 1])
            .unwrap()
    };
    assert_eq!(sweep(1, 5).to_bits(), sweep(1, 5).to_bits());
    assert_ne!(sweep(1, 5), sweep(2, 5));
    assert_ne!(sweep(1, 5), sweep(1, 6));
}
