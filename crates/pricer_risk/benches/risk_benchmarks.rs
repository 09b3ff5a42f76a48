//! Criterion benchmarks for range sweeps.
//!
//! Compares sweep time across worker counts for a closed-form model and a
//! lattice model, where per-point cost dominates pool overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{InputField, MarketInputSet, OptionConfig, ResultSet};
use pricer_models::analytical::EuropeanBlackScholes;
use pricer_models::lattice::BinomialTree;
use pricer_risk::range::{RangeCalculationEngine, RangeSpec};

fn base() -> MarketInputSet {
    MarketInputSet::new()
        .with(InputField::Strike, 100.0)
        .with(InputField::UnderlyingPrice, 100.0)
        .with(InputField::Volatility, 0.2)
        .with(InputField::TimeToExpiry, 1.0)
        .with(InputField::InterestRate, 0.05)
}

/// Benchmark a 201-point spot sweep with the closed-form model.
fn bench_european_sweep(c: &mut Criterion) {
    let spec = RangeSpec::new(InputField::UnderlyingPrice, 50.0, 150.0, 0.5);
    let mut group = c.benchmark_group("range_european");

    for threads in [1, 2, 4] {
        let engine = RangeCalculationEngine::with_threads(threads).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), &engine, |b, engine| {
            b.iter(|| {
                let mut results = ResultSet::with_capacity(201);
                engine
                    .calculate_range(
                        &EuropeanBlackScholes,
                        OptionConfig::european_call(),
                        black_box(&base()),
                        &spec,
                        &mut results,
                    )
                    .unwrap();
                results
            });
        });
    }

    group.finish();
}

/// Benchmark a 21-point strike sweep with a 200-step American lattice.
fn bench_binomial_sweep(c: &mut Criterion) {
    let spec = RangeSpec::new(InputField::Strike, 90.0, 110.0, 1.0);
    let tree = BinomialTree::new(200);
    let mut group = c.benchmark_group("range_binomial");
    group.sample_size(20);

    for threads in [1, 4] {
        let engine = RangeCalculationEngine::with_threads(threads).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), &engine, |b, engine| {
            b.iter(|| {
                let mut results = ResultSet::new();
                engine
                    .calculate_range(
                        &tree,
                        OptionConfig::american_put(),
                        black_box(&base()),
                        &spec,
                        &mut results,
                    )
                    .unwrap();
                results
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_european_sweep, bench_binomial_sweep);
criterion_main!(benches);
