//! Benchmarks for the convertible pricing lattice.
//!
//! Run with: cargo bench -p chimera-convertibles

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chimera_convertibles::prelude::*;
use chimera_core::types::Date;

fn test_security(with_refixing: bool) -> HybridSecurity {
    let valuation = Date::from_ymd(2025, 6, 15).unwrap();
    let mut builder = HybridSecurity::builder("BENCH-RCPS")
        .valuation_date(valuation)
        .maturity_years(3.0)
        .current_stock_price(20_000.0)
        .volatility(0.35)
        .risk_free_rate(0.035)
        .credit_spread(0.02)
        .conversion_price(25_000.0)
        .face_value(50_000.0)
        .redemption_premium(0.05)
        .refix_floor(17_500.0)
        .num_shares(10_000.0);
    if with_refixing {
        builder = builder.ipo_refixing(IpoRefixing {
            check_date: valuation.add_days(180),
            threshold_price: 28_000.0,
            failure_refix_ratio: 0.70,
        });
    }
    builder.build().unwrap()
}

fn bench_price_by_steps(c: &mut Criterion) {
    let security = test_security(false);
    let mut group = c.benchmark_group("price_by_steps");

    for steps in [50usize, 100, 200, 300] {
        let pricer = ConvertiblePricer::new().with_max_steps(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, _| {
            b.iter(|| pricer.price(black_box(&security)).unwrap());
        });
    }
    group.finish();
}

fn bench_price_with_refixing(c: &mut Criterion) {
    let security = test_security(true);
    let pricer = ConvertiblePricer::new();

    c.bench_function("price_with_refixing_300_steps", |b| {
        b.iter(|| pricer.price(black_box(&security)).unwrap());
    });
}

fn bench_price_with_trace(c: &mut Criterion) {
    let security = test_security(true);
    let pricer = ConvertiblePricer::new();

    c.bench_function("price_with_trace_300_steps", |b| {
        b.iter(|| pricer.price_with_trace(black_box(&security)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_price_by_steps,
    bench_price_with_refixing,
    bench_price_with_trace
);
criterion_main!(benches);
