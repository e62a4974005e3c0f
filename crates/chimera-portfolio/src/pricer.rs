//! Portfolio pricer and aggregate valuation.

use serde::{Deserialize, Serialize};

use chimera_convertibles::pricing::ConvertiblePricer;
use chimera_convertibles::{HybridSecurity, ValuationResult};

use crate::config::PricingConfig;
use crate::error::{PortfolioError, PortfolioResult};
use crate::parallel::maybe_parallel_map;

/// Aggregate fair value of a set of hybrid securities.
///
/// Component totals are plain sums over the per-security results; the split
/// ratio is recomputed from the summed components rather than averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    /// Sum of the per-security total values.
    pub total_value: f64,
    /// Sum of the per-security debt components.
    pub debt_component: f64,
    /// Sum of the per-security equity components.
    pub equity_component: f64,
    /// equity_component / total_value, or 0 when the total is 0.
    pub split_ratio: f64,
    /// Per-security results, in input order.
    pub securities: Vec<ValuationResult>,
}

impl PortfolioValuation {
    /// Returns the number of securities priced.
    #[must_use]
    pub fn security_count(&self) -> usize {
        self.securities.len()
    }

    /// Returns true if no securities were priced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    /// Returns true if any per-security result carries warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.securities.iter().any(ValuationResult::has_warnings)
    }
}

/// Prices many hybrid securities independently and aggregates the results.
///
/// Each security is priced with no shared state, so pricing MAY fan out
/// across rayon workers (the `parallel` feature) with zero synchronization;
/// parallel and sequential runs produce bit-identical valuations.
///
/// # Example
///
/// ```rust,ignore
/// use chimera_portfolio::prelude::*;
///
/// let pricer = PortfolioPricer::new();
/// let valuation = pricer.price_many(&securities)?;
/// println!("portfolio fair value: {}", valuation.total_value);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioPricer {
    pricer: ConvertiblePricer,
    config: PricingConfig,
}

impl PortfolioPricer {
    /// Creates a portfolio pricer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given security pricer (step cap etc.).
    #[must_use]
    pub fn with_pricer(mut self, pricer: ConvertiblePricer) -> Self {
        self.pricer = pricer;
        self
    }

    /// Uses the given parallelism configuration.
    #[must_use]
    pub fn with_config(mut self, config: PricingConfig) -> Self {
        self.config = config;
        self
    }

    /// Prices every security and aggregates the component totals.
    ///
    /// An empty slice yields an empty valuation with zero totals.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::SecurityPricingFailed` naming the first
    /// security whose pricing failed; no partial aggregate is returned.
    pub fn price_many(
        &self,
        securities: &[HybridSecurity],
    ) -> PortfolioResult<PortfolioValuation> {
        let priced = maybe_parallel_map(securities, &self.config, |security| {
            self.pricer
                .price(security)
                .map_err(|source| PortfolioError::SecurityPricingFailed {
                    security_id: security.security_id.clone(),
                    source,
                })
        });

        let mut results = Vec::with_capacity(priced.len());
        for result in priced {
            results.push(result?);
        }

        let debt_component: f64 = results.iter().map(|r| r.debt_component).sum();
        let equity_component: f64 = results.iter().map(|r| r.equity_component).sum();
        let total_value: f64 = results.iter().map(|r| r.total_value).sum();
        let split_ratio = if total_value > 0.0 {
            equity_component / total_value
        } else {
            0.0
        };

        tracing::debug!(
            securities = results.len(),
            total_value,
            "portfolio valuation aggregated"
        );

        Ok(PortfolioValuation {
            total_value,
            debt_component,
            equity_component,
            split_ratio,
            securities: results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chimera_core::types::Date;

    fn test_security(id: &str, spot: f64) -> HybridSecurity {
        HybridSecurity::builder(id)
            .valuation_date(Date::from_ymd(2025, 6, 15).unwrap())
            .maturity_years(2.0)
            .current_stock_price(spot)
            .conversion_price(25_000.0)
            .face_value(50_000.0)
            .num_shares(1_000.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_portfolio() {
        let valuation = PortfolioPricer::new().price_many(&[]).unwrap();
        assert!(valuation.is_empty());
        assert_eq!(valuation.total_value, 0.0);
        assert_eq!(valuation.split_ratio, 0.0);
    }

    #[test]
    fn test_totals_are_sums() {
        let securities = vec![
            test_security("A", 18_000.0),
            test_security("B", 22_000.0),
            test_security("C", 30_000.0),
        ];
        let valuation = PortfolioPricer::new().price_many(&securities).unwrap();

        let expected_total: f64 = valuation.securities.iter().map(|r| r.total_value).sum();
        assert_relative_eq!(valuation.total_value, expected_total, epsilon = 1e-9);
        assert_relative_eq!(
            valuation.total_value,
            valuation.debt_component + valuation.equity_component,
            epsilon = 1e-6
        );
        assert_eq!(valuation.security_count(), 3);
        assert_eq!(valuation.securities[0].security_id, "A");
    }

    #[test]
    fn test_failure_names_the_security() {
        let mut bad = test_security("BAD", 20_000.0);
        bad.volatility = -1.0;
        let securities = vec![test_security("GOOD", 20_000.0), bad];

        let err = PortfolioPricer::new().price_many(&securities).unwrap_err();
        assert!(err.to_string().contains("BAD"));
    }
}
