//! Criterion benchmarks for diagnostic evaluation over a full interior.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use eddy_bench::{reference_diagnostics, reference_state, REFERENCE_SIZE};
use eddy_diagnostics::{compute_interior, compute_interior_parallel, ComputeConfig};

/// Benchmark: materialize each diagnostic over the 64³ interior, serially.
fn bench_each_diagnostic_serial(c: &mut Criterion) {
    let state = reference_state(REFERENCE_SIZE, 7);
    let set = match reference_diagnostics(&state) {
        Ok(set) => set,
        Err(e) => panic!("reference diagnostics: {e}"),
    };

    let mut group = c.benchmark_group("diagnostic_serial_64");
    group.sample_size(20);
    for name in set.names() {
        let Some(field) = set.get(name) else { continue };
        group.bench_function(name, |b| {
            b.iter(|| black_box(compute_interior(&**field, &*state.grid)));
        });
    }
    group.finish();
}

/// Benchmark: Ertel PV over the 64³ interior with 1, 2 and 4 workers.
fn bench_ertel_parallel(c: &mut Criterion) {
    let state = reference_state(REFERENCE_SIZE, 7);
    let set = match reference_diagnostics(&state) {
        Ok(set) => set,
        Err(e) => panic!("reference diagnostics: {e}"),
    };
    let Some(pv) = set.get("ertel_pv") else {
        panic!("ertel_pv missing from reference set");
    };

    let mut group = c.benchmark_group("ertel_parallel_64");
    group.sample_size(20);
    for workers in [1, 2, 4] {
        let config = ComputeConfig {
            workers: Some(workers),
        };
        group.bench_function(format!("workers_{workers}"), |b| {
            b.iter(|| black_box(compute_interior_parallel(&**pv, &*state.grid, &config)));
        });
    }
    group.finish();
}

/// Benchmark: every diagnostic at one index, as a monitoring probe would.
fn bench_set_point_evaluation(c: &mut Criterion) {
    let state = reference_state(REFERENCE_SIZE, 7);
    let set = match reference_diagnostics(&state) {
        Ok(set) => set,
        Err(e) => panic!("reference diagnostics: {e}"),
    };
    let idx = eddy_core::Idx3::new(32, 32, 32);

    c.bench_function("diagnostic_set_point", |b| {
        b.iter(|| black_box(set.evaluate(black_box(idx))));
    });
}

criterion_group!(
    benches,
    bench_each_diagnostic_serial,
    bench_ertel_parallel,
    bench_set_point_evaluation
);
criterion_main!(benches);
