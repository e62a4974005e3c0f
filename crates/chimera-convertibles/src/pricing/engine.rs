//! Split-value backward induction engine.

use crate::error::{ConvertibleError, ConvertibleResult};
use crate::lattice::{CrrFactors, LatticeGrid};

/// The (debt, equity) value surfaces produced by one backward induction.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSurfaces {
    /// Debt-component values per node.
    pub debt: LatticeGrid,
    /// Equity-component values per node.
    pub equity: LatticeGrid,
}

impl SplitSurfaces {
    /// Per-unit debt/host value at the root node.
    #[must_use]
    pub fn root_debt(&self) -> f64 {
        self.debt.value_at(0, 0)
    }

    /// Per-unit equity/option value at the root node.
    #[must_use]
    pub fn root_equity(&self) -> f64 {
        self.equity.value_at(0, 0)
    }
}

/// Backward induction over a (debt, equity) value pair per node.
///
/// The two components discount at different rates (the Tsiveriotis-Fernandes
/// split): the debt continuation at the credit-risky rate, the equity
/// continuation at the risk-free rate. At every node the holder converts
/// only when the conversion value strictly exceeds the total continuation
/// value; on an exact tie the security is held. The tie-break is part of the
/// contract of this engine and is enforced with a strict `>`, never left to
/// floating-point accident.
///
/// The pass is iterative over step-indexed arrays; no recursion.
#[derive(Debug, Clone)]
pub struct SplitValueEngine<'a> {
    factors: &'a CrrFactors,
    stock: &'a LatticeGrid,
    conversion: &'a LatticeGrid,
    face_value: f64,
    redemption_value: f64,
}

impl<'a> SplitValueEngine<'a> {
    /// Creates an engine over prepared forward trees.
    ///
    /// `stock` and `conversion` must have the same step count.
    #[must_use]
    pub fn new(
        factors: &'a CrrFactors,
        stock: &'a LatticeGrid,
        conversion: &'a LatticeGrid,
        face_value: f64,
        redemption_value: f64,
    ) -> Self {
        debug_assert_eq!(stock.steps(), conversion.steps());
        Self {
            factors,
            stock,
            conversion,
            face_value,
            redemption_value,
        }
    }

    /// Value received per unit upon conversion at the given node.
    fn conversion_value(&self, step: usize, state: usize) -> f64 {
        self.stock.value_at(step, state) * (self.face_value / self.conversion.value_at(step, state))
    }

    /// Runs the backward induction and returns the value surfaces.
    ///
    /// # Errors
    ///
    /// Returns `ConvertibleError::NonFiniteValue` if any node produces a
    /// non-finite debt or equity value; the whole run aborts rather than
    /// returning a partial result.
    pub fn run(&self) -> ConvertibleResult<SplitSurfaces> {
        let steps = self.stock.steps();
        let mut debt = LatticeGrid::new(steps);
        let mut equity = LatticeGrid::new(steps);

        // Terminal layer: convert or redeem, whichever pays more; ties redeem.
        for state in 0..debt.states_at(steps) {
            let conversion_value = self.conversion_value(steps, state);
            if conversion_value > self.redemption_value {
                debt.set_value(steps, state, 0.0);
                equity.set_value(steps, state, conversion_value);
            } else {
                debt.set_value(steps, state, self.redemption_value);
                equity.set_value(steps, state, 0.0);
            }
            check_finite(&debt, &equity, steps, state)?;
        }

        let q = self.factors.prob_up;
        for step in (0..steps).rev() {
            for state in 0..=step {
                let expected_debt =
                    q * debt.value_at(step + 1, state + 1) + (1.0 - q) * debt.value_at(step + 1, state);
                let continuation_debt = expected_debt * self.factors.df_risky;

                let expected_equity = q * equity.value_at(step + 1, state + 1)
                    + (1.0 - q) * equity.value_at(step + 1, state);
                let continuation_equity = expected_equity * self.factors.df_rf;

                let conversion_value = self.conversion_value(step, state);

                // Early conversion requires a strict improvement over holding.
                if conversion_value > continuation_debt + continuation_equity {
                    debt.set_value(step, state, 0.0);
                    equity.set_value(step, state, conversion_value);
                } else {
                    debt.set_value(step, state, continuation_debt);
                    equity.set_value(step, state, continuation_equity);
                }
                check_finite(&debt, &equity, step, state)?;
            }
        }

        Ok(SplitSurfaces { debt, equity })
    }
}

fn check_finite(
    debt: &LatticeGrid,
    equity: &LatticeGrid,
    step: usize,
    state: usize,
) -> ConvertibleResult<()> {
    if !debt.value_at(step, state).is_finite() || !equity.value_at(step, state).is_finite() {
        return Err(ConvertibleError::NonFiniteValue { step, state });
    }
    Ok(())
}
