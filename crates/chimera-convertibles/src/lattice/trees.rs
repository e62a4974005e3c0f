//! Forward-pass builders for the stock-price and conversion-price trees.

use crate::instruments::HybridSecurity;

use super::{CrrFactors, LatticeGrid, TimeGrid};

/// Builds the forward stock-price tree: S(t,i) = S0·u^i·d^(t−i).
#[must_use]
pub fn build_stock_tree(time: &TimeGrid, factors: &CrrFactors, spot: f64) -> LatticeGrid {
    let mut grid = LatticeGrid::new(time.steps());
    for step in 0..=time.steps() {
        for state in 0..grid.states_at(step) {
            let price =
                spot * factors.up.powi(state as i32) * factors.down.powi((step - state) as i32);
            grid.set_value(step, state, price);
        }
    }
    grid
}

/// Builds the conversion-price tree parallel to the stock tree.
///
/// Every node starts at the initial conversion price. When a refixing event
/// is configured, any node whose mapped date is on or after the check date
/// and whose stock price is below the threshold carries the adjusted price
/// `max(refix_floor, K0 × failure_refix_ratio)` instead.
///
/// The trigger depends only on the price at the check date, so evaluating it
/// per recombined node is exact and keeps the structure a lattice rather
/// than a path tree. The adjustment is sticky for that node: a node past the
/// check date below threshold is refixed regardless of how later steps
/// evolve. The refixed price is computed once here, during the forward pass,
/// and never re-derived during backward induction.
#[must_use]
pub fn build_conversion_tree(
    time: &TimeGrid,
    stock: &LatticeGrid,
    security: &HybridSecurity,
) -> LatticeGrid {
    let initial = security.conversion_price;
    let mut grid = LatticeGrid::new(time.steps());

    let refixed_price = security.ipo_refixing.as_ref().map(|refix| {
        (
            refix.check_date,
            refix.threshold_price,
            security
                .refix_floor
                .max(initial * refix.failure_refix_ratio),
        )
    });

    for step in 0..=time.steps() {
        let node_date = time.date_at(step);
        for state in 0..grid.states_at(step) {
            let mut conversion_price = initial;
            if let Some((check_date, threshold, adjusted)) = refixed_price {
                if node_date >= check_date && stock.value_at(step, state) < threshold {
                    conversion_price = adjusted;
                }
            }
            grid.set_value(step, state, conversion_price);
        }
    }
    grid
}
