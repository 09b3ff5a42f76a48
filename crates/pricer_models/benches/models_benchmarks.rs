//! Criterion benchmarks for the pricing models.
//!
//! One full `calculate` (price plus five Greeks) per model at the money, and
//! the binomial lattice price alone across step counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::traits::PricingModel;
use pricer_core::types::{InputField, MarketInputSet, OptionConfig};
use pricer_models::lattice::BinomialTree;
use pricer_models::registry::{ModelKind, ModelRegistry, ModelSettings};

fn atm_inputs() -> MarketInputSet {
    MarketInputSet::new()
        .with(InputField::Strike, 100.0)
        .with(InputField::UnderlyingPrice, 100.0)
        .with(InputField::Volatility, 0.2)
        .with(InputField::TimeToExpiry, 1.0)
        .with(InputField::InterestRate, 0.05)
}

/// Benchmark `calculate` for every model with reduced numerical settings.
fn bench_calculate(c: &mut Criterion) {
    let registry = ModelRegistry::new(ModelSettings {
        binomial_steps: 200,
        monte_carlo_paths: 10_000,
        monte_carlo_seed: Some(42),
        ..ModelSettings::default()
    });
    let inputs = atm_inputs();
    let mut group = c.benchmark_group("calculate");

    for kind in ModelKind::ALL {
        let model = registry.get(kind);
        group.bench_function(kind.name(), |b| {
            b.iter(|| {
                model
                    .calculate(black_box(OptionConfig::american_put()), black_box(&inputs))
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark lattice pricing as the step count grows.
fn bench_binomial_steps(c: &mut Criterion) {
    let params = atm_inputs().params().unwrap();
    let mut group = c.benchmark_group("binomial_price");

    for steps in [100, 500, 1000] {
        let tree = BinomialTree::new(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &tree, |b, tree| {
            b.iter(|| {
                tree.price(black_box(OptionConfig::american_put()), black_box(&params))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calculate, bench_binomial_steps);
criterion_main!(benches);
