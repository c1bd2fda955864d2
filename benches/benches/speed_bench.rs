//! # Speed Benchmarks
//!
//! Measures percentage normalization and speed conversion.
//!
//! Run: `cargo bench --bench speed_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use brick_speed::constants::{EV3_WHEEL_DIAMETER_MM, LARGE_MOTOR_RPM, MEDIUM_MOTOR_RPM};
use brick_speed::{
    angular_to_linear, linear_to_angular, normalize, speed_angular, speed_linear, DriveProfile,
};

/// Benchmark normalization paths (in range, clamped, fallback)
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for (name, percent) in [
        ("in_range", Some(42.0)),
        ("clamped", Some(250.0)),
        ("none", None),
        ("nan", Some(f64::NAN)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &percent, |b, p| {
            b.iter(|| black_box(normalize(black_box(*p), -100.0, 100.0)))
        });
    }

    group.bench_function("swapped_bounds", |b| {
        b.iter(|| black_box(normalize(black_box(Some(30.0)), 100.0, -100.0)))
    });

    group.finish();
}

/// Benchmark percentage → physical speed
fn bench_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("speed");

    group.bench_function("linear", |b| {
        b.iter(|| {
            black_box(speed_linear(
                black_box(Some(50.0)),
                LARGE_MOTOR_RPM,
                EV3_WHEEL_DIAMETER_MM,
                -100.0,
                100.0,
            ))
        })
    });

    group.bench_function("angular", |b| {
        b.iter(|| black_box(speed_angular(black_box(Some(75.0)), MEDIUM_MOTOR_RPM, -100.0, 100.0)))
    });

    group.bench_function("round_trip", |b| {
        b.iter(|| {
            let deg = linear_to_angular(black_box(200.0), EV3_WHEEL_DIAMETER_MM);
            black_box(angular_to_linear(deg, EV3_WHEEL_DIAMETER_MM))
        })
    });

    let profile = DriveProfile::default();
    group.bench_function("profile_linear", |b| {
        b.iter(|| black_box(profile.linear(black_box(Some(-30.0)))))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_speed);
criterion_main!(benches);
