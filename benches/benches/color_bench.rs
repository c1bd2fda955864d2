//! # Color Benchmarks
//!
//! Measures color matching and reflection conversions.
//!
//! Run: `cargo bench --bench color_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use brick_devices::{bearing, Color, ColorMatch, Comparison, Reflection};

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    let one = ColorMatch::from(Color::Red);
    let set = ColorMatch::from(Color::ALL.to_vec());
    group.bench_function("match_one", |b| {
        b.iter(|| black_box(one.matches(black_box(Some(Color::Red)))))
    });
    group.bench_function("match_any_of_9", |b| {
        b.iter(|| black_box(set.matches(black_box(Some(Color::Purple)))))
    });

    let reflection = Reflection::new(62.0, 18.0, 35.0);
    group.bench_function("hsv", |b| b.iter(|| black_box(black_box(reflection).hsv())));
    group.bench_function("hex", |b| b.iter(|| black_box(black_box(reflection).hex())));

    group.finish();
}

fn bench_sensor_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensor_math");

    group.bench_function("bearing", |b| b.iter(|| black_box(bearing(black_box(-1234.5)))));
    group.bench_function("compare", |b| {
        b.iter(|| black_box(Comparison::GreaterOrEqual.evaluate(black_box(&12.5), &10.0)))
    });

    group.finish();
}

criterion_group!(benches, bench_color, bench_sensor_math);
criterion_main!(benches);
