//! Aggregation tests for the portfolio pricer.

use approx::assert_relative_eq;
use chimera_portfolio::prelude::*;
use chimera_core::types::Date;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn deal(id: &str, spot: f64, with_refixing: bool) -> HybridSecurity {
    let valuation = date(2025, 6, 15);
    let mut builder = HybridSecurity::builder(id)
        .valuation_date(valuation)
        .maturity_years(3.0)
        .current_stock_price(spot)
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

fn sample_portfolio() -> Vec<HybridSecurity> {
    vec![
        deal("ALPHA-RCPS", 18_000.0, false),
        deal("BRAVO-RCPS", 20_000.0, true),
        deal("CHARLIE-CB", 26_000.0, false),
    ]
}

#[test]
fn aggregates_match_per_security_sums() {
    let pricer = PortfolioPricer::new();
    let valuation = pricer.price_many(&sample_portfolio()).unwrap();

    assert_eq!(valuation.security_count(), 3);

    let debt: f64 = valuation.securities.iter().map(|r| r.debt_component).sum();
    let equity: f64 = valuation
        .securities
        .iter()
        .map(|r| r.equity_component)
        .sum();

    assert_eq!(valuation.debt_component, debt);
    assert_eq!(valuation.equity_component, equity);
    assert_relative_eq!(
        valuation.split_ratio,
        equity / valuation.total_value,
        epsilon = 1e-12
    );
}

#[test]
fn per_security_results_keep_input_order_and_ids() {
    let valuation = PortfolioPricer::new()
        .price_many(&sample_portfolio())
        .unwrap();

    let ids: Vec<&str> = valuation
        .securities
        .iter()
        .map(|r| r.security_id.as_str())
        .collect();
    assert_eq!(ids, vec!["ALPHA-RCPS", "BRAVO-RCPS", "CHARLIE-CB"]);
}

#[test]
fn securities_are_priced_independently() {
    let pricer = PortfolioPricer::new();
    let portfolio = sample_portfolio();

    let together = pricer.price_many(&portfolio).unwrap();
    let alone = pricer.price_many(&portfolio[1..2]).unwrap();

    // Same security, same result, regardless of which neighbors were priced.
    assert_eq!(together.securities[1], alone.securities[0]);
}

#[test]
fn repeated_portfolio_pricing_is_bit_identical() {
    let pricer = PortfolioPricer::new();
    let portfolio = sample_portfolio();

    let first = pricer.price_many(&portfolio).unwrap();
    let second = pricer.price_many(&portfolio).unwrap();
    assert_eq!(first.total_value.to_bits(), second.total_value.to_bits());
    assert_eq!(first, second);
}

#[test]
fn sequential_config_matches_default() {
    let portfolio = sample_portfolio();
    let default = PortfolioPricer::new().price_many(&portfolio).unwrap();
    let sequential = PortfolioPricer::new()
        .with_config(PricingConfig::sequential())
        .price_many(&portfolio)
        .unwrap();

    assert_eq!(default, sequential);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_pricing_is_bit_identical_to_sequential() {
    let portfolio: Vec<HybridSecurity> = (0..12)
        .map(|i| deal(&format!("DEAL-{i}"), 15_000.0 + 1_000.0 * i as f64, i % 2 == 0))
        .collect();

    let sequential = PortfolioPricer::new()
        .with_config(PricingConfig::sequential())
        .price_many(&portfolio)
        .unwrap();
    let parallel = PortfolioPricer::new()
        .with_config(PricingConfig::default().with_threshold(1))
        .price_many(&portfolio)
        .unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn pricing_failure_aborts_the_portfolio() {
    let mut portfolio = sample_portfolio();
    portfolio[2].current_stock_price = f64::NAN;

    let err = PortfolioPricer::new().price_many(&portfolio).unwrap_err();
    assert!(matches!(
        err,
        PortfolioError::SecurityPricingFailed { ref security_id, .. }
            if security_id.as_str() == "CHARLIE-CB"
    ));
}

#[test]
fn warnings_bubble_up_to_the_portfolio() {
    let mut portfolio = sample_portfolio();
    portfolio[0].total_amount = 1.0; // stated amount wildly off

    let valuation = PortfolioPricer::new().price_many(&portfolio).unwrap();
    assert!(valuation.has_warnings());
    assert!(valuation.securities[0].has_warnings());
    assert!(!valuation.securities[1].has_warnings());
}

#[test]
fn smaller_step_cap_still_aggregates() {
    let pricer = PortfolioPricer::new().with_pricer(ConvertiblePricer::new().with_max_steps(60));
    let valuation = pricer.price_many(&sample_portfolio()).unwrap();

    for result in &valuation.securities {
        assert_eq!(result.lattice_steps, 60);
    }
    assert!(valuation.total_value > 0.0);
}

#[test]
fn valuation_serde_round_trip() {
    let valuation = PortfolioPricer::new()
        .price_many(&sample_portfolio())
        .unwrap();
    let json = serde_json::to_string(&valuation).unwrap();
    let back: PortfolioValuation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, valuation);
}
