//! Benchmarks for the variational update and driver modes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use inferir::prelude::*;

fn engine(n: usize) -> GaussianVb {
    let mut sampler = GaussianSampler::new(1.5, 1.0, 42).expect("valid sampler");
    let ys = sampler.sample(n);
    GaussianVb::new(&ys, NormalGammaPrior::noninformative()).expect("valid observations")
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("vb_step");

    for size in [10, 200, 5000].iter() {
        let vb = engine(*size);
        let state = vb.prior().posterior();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| vb.step(black_box(&state)).unwrap());
        });
    }

    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("vb_run");

    let vb = engine(200);
    let init = vb.prior().posterior();

    group.bench_function("fixed_10", |b| {
        b.iter(|| vb.run(black_box(init), 10).unwrap());
    });
    group.bench_function("tolerance_1e9", |b| {
        b.iter(|| vb.run_to_tolerance(black_box(init), 1e-9, 100).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_step, bench_run);
criterion_main!(benches);
