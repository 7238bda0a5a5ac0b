//! Criterion micro-benchmarks for the per-period kernels.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use prefield_economy::{update, Economy};
use prefield_engine::uniform_random_field;
use prefield_space::{aggregate, Square8};

/// Benchmark: Moore-neighbour sum over a 50×50 field.
fn bench_aggregate_2500(c: &mut Criterion) {
    let field = uniform_random_field(50, 121).unwrap();

    c.bench_function("aggregate_2500", |b| {
        b.iter(|| black_box(aggregate(black_box(&field))));
    });
}

/// Benchmark: Moore-neighbour sum over a 316×316 field (~100K cells).
fn bench_aggregate_100k(c: &mut Criterion) {
    let field = uniform_random_field(316, 121).unwrap();

    c.bench_function("aggregate_100k", |b| {
        b.iter(|| black_box(aggregate(black_box(&field))));
    });
}

/// Benchmark: neighbours() on all 2500 cells of a 50×50 lattice.
fn bench_neighbours_2500(c: &mut Criterion) {
    let space = Square8::new(50).unwrap();

    c.bench_function("neighbours_2500", |b| {
        b.iter(|| {
            for row in 0..50 {
                for col in 0..50 {
                    black_box(space.neighbours(row, col));
                }
            }
        });
    });
}

/// Benchmark: one preference update on a 50×50 field.
fn bench_update_2500(c: &mut Criterion) {
    let field = uniform_random_field(50, 121).unwrap();

    c.bench_function("update_2500", |b| {
        b.iter(|| black_box(update::step(black_box(&field), 1.0, 0.5).unwrap()));
    });
}

/// Benchmark: price ratio of a 50×50 field under each feedback economy.
fn bench_price_ratio_2500(c: &mut Criterion) {
    let field = uniform_random_field(50, 121).unwrap();
    let exchange = Economy::exchange(1.0, 1.0);
    let decreasing = Economy::decreasing_returns();

    c.bench_function("price_exchange_2500", |b| {
        b.iter(|| black_box(exchange.price_ratio(black_box(&field)).unwrap()));
    });
    c.bench_function("price_decreasing_2500", |b| {
        b.iter(|| black_box(decreasing.price_ratio(black_box(&field)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_aggregate_2500,
    bench_aggregate_100k,
    bench_neighbours_2500,
    bench_update_2500,
    bench_price_ratio_2500
);
criterion_main!(benches);
