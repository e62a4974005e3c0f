//! RCPS Valuation Example
//!
//! Prices a three-year redeemable convertible preferred issue twice, once
//! plain and once with an IPO-conditional refixing clause 180 days out, and
//! prints the fair-value split of each.
//!
//! Run with: cargo run -p chimera-convertibles --example price_rcps

use chimera_convertibles::prelude::*;
use chimera_core::types::Date;

fn main() {
    let valuation = Date::from_ymd(2025, 6, 15).unwrap();

    let plain = HybridSecurity::builder("GROWTHCO-SERIES-B")
        .valuation_date(valuation)
        .maturity_years(3.0)
        .current_stock_price(20_000.0)
        .volatility(0.35)
        .conversion_price(25_000.0)
        .face_value(50_000.0)
        .num_shares(10_000.0)
        .build()
        .expect("valid security");

    let mut refixed = plain.clone();
    refixed.security_id = "GROWTHCO-SERIES-B-REFIX".to_string();
    refixed.ipo_refixing = Some(IpoRefixing {
        check_date: valuation.add_days(180),
        threshold_price: 28_000.0,
        failure_refix_ratio: 0.70,
    });

    let pricer = ConvertiblePricer::new();

    for security in [&plain, &refixed] {
        let result = pricer.price(security).expect("pricing succeeds");
        println!("{}", result.security_id);
        println!("  total value     : {:>16.0}", result.total_value);
        println!("  debt component  : {:>16.0}", result.debt_component);
        println!("  equity component: {:>16.0}", result.equity_component);
        println!("  split ratio     : {:>15.1}%", result.split_ratio * 100.0);
        println!("  lattice steps   : {:>16}", result.lattice_steps);
        println!();
    }
}
