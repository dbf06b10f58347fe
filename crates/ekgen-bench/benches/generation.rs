//! Criterion benchmarks for kernel construction.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ekgen::generate_kernels;
use ekgen_bench::{reference_config, stress_config};
use ekgen_core::{Expr, Stencil};
use ekgen_kernels::{
    add_fluctuations, add_ghostlayer_folding, create_advection_diffusion_method,
    domain_extent_symbols, EkFields,
};

/// Benchmark: build the whole default catalog.
fn bench_generate_reference(c: &mut Criterion) {
    let config = reference_config();
    c.bench_function("generate_reference_catalog", |b| {
        b.iter(|| {
            let set = generate_kernels(black_box(&config)).unwrap();
            black_box(set.len());
        });
    });
}

/// Benchmark: build the D3Q27, eight-species catalog.
fn bench_generate_stress(c: &mut Criterion) {
    let config = stress_config();
    c.bench_function("generate_stress_catalog", |b| {
        b.iter(|| {
            let set = generate_kernels(black_box(&config)).unwrap();
            black_box(set.len());
        });
    });
}

/// Benchmark: fluctuation injection plus folding on a D3Q27 flux.
fn bench_fluctuate_and_fold(c: &mut Criterion) {
    let fields = EkFields::new(Stencil::D3Q27, Default::default(), Default::default());
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
    let extents = domain_extent_symbols();

    c.bench_function("fluctuate_and_fold_d3q27", |b| {
        b.iter(|| {
            let noisy = add_fluctuations(
                black_box(&flux),
                &fields.c,
                &fields.j,
                &d,
                Stencil::D3Q27.noise_factor(),
            )
            .unwrap();
            black_box(add_ghostlayer_folding(&noisy, &extents));
        });
    });
}

criterion_group!(
    benches,
    bench_generate_reference,
    bench_generate_stress,
    bench_fluctuate_and_fold
);
criterion_main!(benches);
