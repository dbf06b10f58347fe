use ekgen_core::{Expr, Field};
use ekgen_kernels::{
    create_reaction_method, reaction_coefficients, reaction_continuity, reaction_orders, EkFields,
};
use ekgen_space::DomainExtent;
use ekgen_test_utils::fixtures::symbols;
use ekgen_test_utils::{run_interior_sweep, MockFieldStore};

#[test]
fn two_species_mass_action() {
    let fields = EkFields::default();
    let species: Vec<_> = (1..=2).map(|i| fields.species(i)).collect();
    let c: Vec<Field> = species.iter().map(|s| s.c.clone()).collect();
    let r: Vec<Field> = species.iter().map(|s| s.r.clone()).collect();
    let kernel = create_reaction_method(
        &c,
        &r,
        &Expr::symbol("gamma"),
        &reaction_coefficients(2),
        &reaction_orders(2),
    )
    .unwrap();

    let domain = DomainExtent::cubic(2).unwrap();
    let mut store = MockFieldStore::new(domain);
    store.fill("c_1", 0, 0.5);
    store.fill("c_2", 0, 3.0);
    let bindings = symbols(&[
        ("gamma", 2.0),
        ("n_0", -1.0),
        ("n_1", 2.0),
        ("O_0", 2.0),
        ("O_1", 1.0),
    ]);
    let out = run_interior_sweep(&kernel, &store, &bindings).unwrap();
    // rate = 2 · 0.5² · 3 = 1.5
    assert_eq!(out.get("r_1", 0, [0, 0, 0]), Some(-1.5));
    assert_eq!(out.get("r_2", 0, [1, 1, 1]), Some(3.0));
}

#[test]
fn reaction_flux_feeds_back_into_concentration() {
    let fields = EkFields::default();
    let kernel = reaction_continuity(&fields.c, &fields.r);
    let mut store = MockFieldStore::new(DomainExtent::cubic(2).unwrap());
    store.fill("c", 0, 1.0);
    store.fill("r", 0, 0.25);
    let out = run_interior_sweep(&kernel, &store, &symbols(&[])).unwrap();
    assert_eq!(out.total("c", 0), 8.0 * 1.25);
}
