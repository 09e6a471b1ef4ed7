//! Benchmarks for the flyweight factories
//!
//! Compares the read-locked hit path against conversions that register new
//! instances.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wahlzeit_coordinates::{CartesianCoordinate, Coordinate, SphericCoordinate};

fn bench_factory_hits(c: &mut Criterion) {
    CartesianCoordinate::get(1.23, 2.34, 3.45).unwrap();
    SphericCoordinate::get(1.0, 2.0, 3.0).unwrap();

    c.bench_function("cartesian_get_hit", |b| {
        b.iter(|| CartesianCoordinate::get(black_box(1.23), black_box(2.34), black_box(3.45)))
    });
    c.bench_function("spheric_get_hit", |b| {
        b.iter(|| SphericCoordinate::get(black_box(1.0), black_box(2.0), black_box(3.0)))
    });
}

fn bench_factory_misses(c: &mut Criterion) {
    let mut x = 0.0f64;
    c.bench_function("cartesian_get_miss", |b| {
        b.iter(|| {
            x += 1.0;
            CartesianCoordinate::get(black_box(x), 0.0, 0.0)
        })
    });
}

fn bench_distances(c: &mut Criterion) {
    let a = Coordinate::cartesian(1.23, 2.34, 3.45).unwrap();
    let s = Coordinate::spheric(1.0, 2.0, 3.0).unwrap();

    c.bench_function("cartesian_distance", |b| {
        b.iter(|| black_box(&a).cartesian_distance(black_box(&s)))
    });
    c.bench_function("spheric_distance", |b| {
        b.iter(|| black_box(&s).spheric_distance(black_box(&a)))
    });
}

criterion_group!(benches, bench_factory_hits, bench_factory_misses, bench_distances);
criterion_main!(benches);
