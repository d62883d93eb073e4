//! Benchmark for pipeline evaluation: fused runs versus eager stages.
//!
//! Measures what fusion saves on long pipelines and on short-circuiting
//! pipelines over large inputs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lambars_fusion::catalog::{filter, find, flat_map, map, map_indexed, take};
use lambars_fusion::pipe::{PipeOptions, Pipeline, evaluate, evaluate_with};
use lambars_fusion::{Stage, Value};
use std::hint::black_box;

fn input(size: i64) -> Value {
    Value::from((0..size).collect::<Vec<_>>())
}

fn increment() -> Stage {
    map(|value: Value| Value::Int(value.as_int().unwrap_or(0) + 1))
}

fn even() -> Stage {
    filter(|value: &Value| value.as_int().is_some_and(|number| number % 2 == 0))
}

// =============================================================================
// Whole-input Benchmarks
// =============================================================================

fn benchmark_map_filter_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_filter_chain");

    let stages = [increment(), even(), increment(), increment(), even()];

    for size in [100, 1000, 10000] {
        let value = input(size);

        group.bench_with_input(BenchmarkId::new("fused", size), &value, |bencher, value| {
            bencher.iter(|| black_box(evaluate(value.clone(), &stages)));
        });

        group.bench_with_input(BenchmarkId::new("eager", size), &value, |bencher, value| {
            bencher.iter(|| black_box(evaluate_with(value.clone(), &stages, PipeOptions::eager())));
        });
    }

    group.finish();
}

fn benchmark_indexed(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("indexed");

    let stages = [
        map_indexed(|value: Value, index: usize, _seen: &[Value]| {
            Value::Int(value.as_int().unwrap_or(0) + i64::try_from(index).unwrap_or(0))
        }),
        even(),
    ];

    for size in [100, 1000] {
        let value = input(size);
        group.bench_with_input(BenchmarkId::new("fused", size), &value, |bencher, value| {
            bencher.iter(|| black_box(evaluate(value.clone(), &stages)));
        });
    }

    group.finish();
}

// =============================================================================
// Short-circuit Benchmarks
// =============================================================================

fn benchmark_take_prefix(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("take_prefix");

    let stages = [increment(), even(), take(10)];
    let value = input(100_000);

    group.bench_function("fused", |bencher| {
        bencher.iter(|| black_box(evaluate(value.clone(), &stages)));
    });

    group.bench_function("eager", |bencher| {
        bencher.iter(|| black_box(evaluate_with(value.clone(), &stages, PipeOptions::eager())));
    });

    group.finish();
}

fn benchmark_find(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("find");

    let stages = [
        increment(),
        find(|value: &Value| value.as_int().is_some_and(|number| number > 500)),
    ];

    for size in [1000, 100_000] {
        let value = input(size);
        group.bench_with_input(BenchmarkId::new("fused", size), &value, |bencher, value| {
            bencher.iter(|| black_box(evaluate(value.clone(), &stages)));
        });
    }

    group.finish();
}

fn benchmark_unbounded(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("unbounded");

    let pipeline = Pipeline::new()
        .then(flat_map(|value: Value| vec![value.clone(), value]))
        .then(even())
        .then(take(1000));

    group.bench_function("flat_map_take", |bencher| {
        bencher.iter(|| black_box(pipeline.evaluate_iter((0..).map(Value::Int))));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map_filter_chain,
    benchmark_indexed,
    benchmark_take_prefix,
    benchmark_find,
    benchmark_unbounded
);
criterion_main!(benches);
