//! CRR lattice factors with split discounting.

use crate::error::{ConvertibleError, ConvertibleResult};

/// Cox-Ross-Rubinstein step factors and the two per-step discount factors.
///
/// The split discount is the defining Tsiveriotis-Fernandes property: the
/// debt component's continuation value discounts at the credit-risky rate
/// (`df_risky`) while the equity component's discounts at the risk-free rate
/// (`df_rf`), because a conversion payoff settled in shares carries no issuer
/// default risk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrFactors {
    /// Up-move multiplier u = exp(σ·√dt).
    pub up: f64,
    /// Down-move multiplier d = 1/u.
    pub down: f64,
    /// Risk-neutral up probability q = (exp(r·dt) − d) / (u − d).
    pub prob_up: f64,
    /// Per-step discount factor at the credit-risky rate (debt component).
    pub df_risky: f64,
    /// Per-step discount factor at the risk-free rate (equity component).
    pub df_rf: f64,
}

impl CrrFactors {
    /// Derives the step factors from market inputs.
    ///
    /// # Errors
    ///
    /// Returns `ConvertibleError::ProbabilityOutOfRange` if the risk-neutral
    /// probability falls outside (0, 1). Unreachable for validated inputs,
    /// but checked rather than assumed.
    pub fn derive(
        volatility: f64,
        risk_free_rate: f64,
        credit_spread: f64,
        dt: f64,
    ) -> ConvertibleResult<Self> {
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let prob_up = ((risk_free_rate * dt).exp() - down) / (up - down);

        if !prob_up.is_finite() || prob_up <= 0.0 || prob_up >= 1.0 {
            return Err(ConvertibleError::ProbabilityOutOfRange {
                probability: prob_up,
            });
        }

        Ok(Self {
            up,
            down,
            prob_up,
            df_risky: (-(risk_free_rate + credit_spread) * dt).exp(),
            df_rf: (-risk_free_rate * dt).exp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factors_basic() {
        let dt = 1.0 / 365.0;
        let factors = CrrFactors::derive(0.35, 0.035, 0.02, dt).unwrap();

        assert_relative_eq!(factors.up, (0.35 * dt.sqrt()).exp(), epsilon = 1e-15);
        assert_relative_eq!(factors.up * factors.down, 1.0, epsilon = 1e-15);
        assert!(factors.prob_up > 0.0 && factors.prob_up < 1.0);
    }

    #[test]
    fn test_discount_ordering_with_spread() {
        let factors = CrrFactors::derive(0.35, 0.035, 0.02, 0.01).unwrap();
        assert!(factors.df_risky < factors.df_rf);
    }

    #[test]
    fn test_discounts_equal_without_spread() {
        let factors = CrrFactors::derive(0.35, 0.035, 0.0, 0.01).unwrap();
        assert_relative_eq!(factors.df_risky, factors.df_rf, epsilon = 1e-15);
    }

    #[test]
    fn test_probability_out_of_range() {
        // Drift dominates a tiny volatility: exp(r·dt) > u forces q > 1.
        let err = CrrFactors::derive(0.001, 2.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            ConvertibleError::ProbabilityOutOfRange { .. }
        ));
    }
}
