//! # Gear Benchmarks
//!
//! Measures gear ratio computation over flat and compound trains.
//!
//! Run: `cargo bench --bench gear_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use brick_gears::{gear_ratio, gear_ratio_value, GearTrain};
use serde_json::json;

fn compound(stages: usize) -> GearTrain {
    GearTrain::Trains((0..stages).map(|_| vec![12.0, 20.0, 36.0]).collect())
}

/// Benchmark typed ratio by train size
fn bench_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("gear_ratio");

    let flat = GearTrain::Flat(vec![12.0, 36.0]);
    group.bench_function("flat_pair", |b| {
        b.iter(|| black_box(gear_ratio(black_box(&flat), None)))
    });

    for stages in [1usize, 4, 16, 64] {
        let train = compound(stages);
        group.bench_with_input(BenchmarkId::new("compound", stages), &train, |b, t| {
            b.iter(|| black_box(gear_ratio(t, None)))
        });
    }

    let deep = compound(64);
    group.bench_function("compound_depth_3", |b| {
        b.iter(|| black_box(gear_ratio(&deep, Some(3))))
    });

    group.finish();
}

/// Benchmark the dynamic (JSON) entry point and notation parsing
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("gear_parse");

    let value = json!([[12, 36], [20, 16, 40]]);
    let depth = json!(2);
    group.bench_function("value_compound", |b| {
        b.iter(|| black_box(gear_ratio_value(black_box(&value), Some(&depth))))
    });

    group.bench_function("notation", |b| {
        b.iter(|| black_box(GearTrain::parse(black_box("12:36/20:16:40/8,24"))))
    });

    group.finish();
}

criterion_group!(benches, bench_ratio, bench_parse);
criterion_main!(benches);
