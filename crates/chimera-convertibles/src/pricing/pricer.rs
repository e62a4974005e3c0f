//! Security pricer: orchestration from specification to result.

use crate::error::ConvertibleResult;
use crate::instruments::HybridSecurity;
use crate::lattice::{build_conversion_tree, build_stock_tree, CrrFactors, TimeGrid};

use super::engine::SplitValueEngine;
use super::result::{LatticeParams, ValuationResult, ValuationWarning};
use super::trace::{TraceNode, ValuationTrace};

/// Default cap on the number of lattice steps.
///
/// Daily steps up to this cap; longer maturities are discretized more
/// coarsely so the O(N²) lattice stays bounded.
pub const DEFAULT_MAX_STEPS: usize = 300;

/// Relative tolerance for the stated-amount consistency check.
const AMOUNT_TOLERANCE: f64 = 1e-4;

/// Prices one hybrid security with the Tsiveriotis-Fernandes lattice.
///
/// The pricer is stateless across calls: every call builds its own lattice
/// and discards it, so pricing the same security twice yields bit-identical
/// results.
///
/// # Example
///
/// ```rust,ignore
/// use chimera_convertibles::pricing::ConvertiblePricer;
///
/// let pricer = ConvertiblePricer::new().with_max_steps(200);
/// let result = pricer.price(&security)?;
/// assert!(result.total_value > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ConvertiblePricer {
    max_steps: usize,
}

impl Default for ConvertiblePricer {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ConvertiblePricer {
    /// Creates a pricer with the default step cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cap on the number of lattice steps.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Returns the configured step cap.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Prices the security.
    ///
    /// # Errors
    ///
    /// Returns `ConvertibleError::InvalidSpec` for invalid inputs (checked
    /// before any lattice work), `ProbabilityOutOfRange` or `NonFiniteValue`
    /// for numerical anomalies. Partial results are never returned.
    pub fn price(&self, security: &HybridSecurity) -> ConvertibleResult<ValuationResult> {
        let (result, _) = self.price_impl(security, false)?;
        Ok(result)
    }

    /// Prices the security and returns the per-step trace alongside.
    ///
    /// # Errors
    ///
    /// Same conditions as [`price`](Self::price).
    pub fn price_with_trace(
        &self,
        security: &HybridSecurity,
    ) -> ConvertibleResult<(ValuationResult, ValuationTrace)> {
        let (result, trace) = self.price_impl(security, true)?;
        Ok((result, trace.expect("trace requested")))
    }

    fn price_impl(
        &self,
        security: &HybridSecurity,
        with_trace: bool,
    ) -> ConvertibleResult<(ValuationResult, Option<ValuationTrace>)> {
        security.validate()?;

        let warnings = consistency_warnings(security);

        if security.valuation_date == security.maturity_date {
            return Ok(price_at_maturity(security, warnings, with_trace));
        }

        let time = TimeGrid::new(security.valuation_date, security.maturity_date, self.max_steps)?;
        let factors = CrrFactors::derive(
            security.volatility,
            security.risk_free_rate,
            security.credit_spread,
            time.dt(),
        )?;

        tracing::debug!(
            security_id = %security.security_id,
            steps = time.steps(),
            dt = time.dt(),
            "running split-value lattice"
        );

        let stock = build_stock_tree(&time, &factors, security.current_stock_price);
        let conversion = build_conversion_tree(&time, &stock, security);

        let engine = SplitValueEngine::new(
            &factors,
            &stock,
            &conversion,
            security.face_value,
            security.redemption_value(),
        );
        let surfaces = engine.run()?;

        let unit_debt = surfaces.root_debt();
        let unit_equity = surfaces.root_equity();
        let params = LatticeParams::new(&time, &factors);

        let trace = with_trace
            .then(|| ValuationTrace::from_surfaces(&time, &stock, &conversion, &surfaces, params));

        let result = assemble_result(
            security,
            unit_debt,
            unit_equity,
            conversion.value_at(0, 0),
            time.steps(),
            Some(params),
            warnings,
        );
        Ok((result, trace))
    }
}

/// Zero-maturity boundary: the intrinsic decision, no lattice.
fn price_at_maturity(
    security: &HybridSecurity,
    warnings: Vec<ValuationWarning>,
    with_trace: bool,
) -> (ValuationResult, Option<ValuationTrace>) {
    let conversion_value = security.current_stock_price * security.conversion_ratio();
    let redemption_value = security.redemption_value();

    let (unit_debt, unit_equity) = if conversion_value > redemption_value {
        (0.0, conversion_value)
    } else {
        (redemption_value, 0.0)
    };

    let trace = with_trace.then(|| {
        ValuationTrace::degenerate(
            security.valuation_date,
            TraceNode {
                stock_price: security.current_stock_price,
                conversion_price: security.conversion_price,
                debt: unit_debt,
                equity: unit_equity,
            },
        )
    });

    let result = assemble_result(
        security,
        unit_debt,
        unit_equity,
        security.conversion_price,
        0,
        None,
        warnings,
    );
    (result, trace)
}

fn assemble_result(
    security: &HybridSecurity,
    unit_debt: f64,
    unit_equity: f64,
    conversion_price_final: f64,
    lattice_steps: usize,
    params: Option<LatticeParams>,
    warnings: Vec<ValuationWarning>,
) -> ValuationResult {
    let debt_component = unit_debt * security.num_shares;
    let equity_component = unit_equity * security.num_shares;
    let total_value = debt_component + equity_component;
    let split_ratio = if total_value > 0.0 {
        equity_component / total_value
    } else {
        0.0
    };

    ValuationResult {
        security_id: security.security_id.clone(),
        security_type: security.security_type,
        total_value,
        debt_component,
        equity_component,
        per_unit_value: unit_debt + unit_equity,
        conversion_price_final,
        lattice_steps,
        split_ratio,
        params,
        warnings,
    }
}

/// Cross-checks the stated issue amount against the per-unit terms.
fn consistency_warnings(security: &HybridSecurity) -> Vec<ValuationWarning> {
    let implied = security.implied_amount();
    let stated = security.total_amount;
    if ((stated - implied) / implied).abs() > AMOUNT_TOLERANCE {
        tracing::warn!(
            security_id = %security.security_id,
            stated,
            implied,
            "total_amount diverges from face_value × num_shares"
        );
        return vec![ValuationWarning::AmountMismatch { stated, implied }];
    }
    Vec::new()
}
