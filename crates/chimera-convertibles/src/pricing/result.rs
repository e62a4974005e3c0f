//! Valuation result types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instruments::SecurityType;
use crate::lattice::{CrrFactors, TimeGrid};

/// Derived lattice parameters, recorded on the result for audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParams {
    /// Number of time steps N.
    pub steps: usize,
    /// Year fraction of a single step.
    pub dt: f64,
    /// Up-move multiplier.
    pub up: f64,
    /// Down-move multiplier.
    pub down: f64,
    /// Risk-neutral up probability.
    pub prob_up: f64,
    /// Per-step discount factor at the credit-risky rate.
    pub df_risky: f64,
    /// Per-step discount factor at the risk-free rate.
    pub df_rf: f64,
}

impl LatticeParams {
    /// Collects the parameters of one pricing run.
    #[must_use]
    pub fn new(time: &TimeGrid, factors: &CrrFactors) -> Self {
        Self {
            steps: time.steps(),
            dt: time.dt(),
            up: factors.up,
            down: factors.down,
            prob_up: factors.prob_up,
            df_risky: factors.df_risky,
            df_rf: factors.df_rf,
        }
    }
}

/// Non-fatal findings surfaced alongside a valuation result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValuationWarning {
    /// The stated issue amount diverges from face value × unit count.
    ///
    /// The result is still computed from the per-unit terms; the divergence
    /// is reported rather than silently rescaled away.
    #[error("Stated total_amount {stated} diverges from face_value × num_shares = {implied}")]
    AmountMismatch {
        /// The amount stated on the security.
        stated: f64,
        /// The amount implied by face_value × num_shares.
        implied: f64,
    },
}

/// The fair-value decomposition of one hybrid security.
///
/// Component values are scaled to the full issue (per-unit root values times
/// `num_shares`). A genuine all-zero valuation arrives as an `Ok` result with
/// zero components; errors never degrade into zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Identifier echoed from the security.
    pub security_id: String,
    /// Classification echoed from the security.
    pub security_type: SecurityType,

    /// Total fair value: debt + equity components.
    pub total_value: f64,
    /// Credit-risky debt/host component.
    pub debt_component: f64,
    /// Credit-risk-free embedded conversion option component.
    pub equity_component: f64,
    /// Root total per unit, before scaling by the unit count.
    pub per_unit_value: f64,

    /// Conversion price at the root node.
    pub conversion_price_final: f64,
    /// Number of lattice steps used (0 for the zero-maturity boundary).
    pub lattice_steps: usize,
    /// equity_component / total_value, or 0 when the total is 0.
    pub split_ratio: f64,

    /// Derived model parameters (absent for the zero-maturity boundary).
    pub params: Option<LatticeParams>,
    /// Non-fatal findings attached to this result.
    pub warnings: Vec<ValuationWarning>,
}

impl ValuationResult {
    /// Returns true if any warnings were attached.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
