//! Hybrid convertible security specification.
//!
//! A [`HybridSecurity`] captures the contractual terms and market inputs for
//! one convertible issue: redeemable convertible preferred stock (RCPS),
//! convertible bonds (CB), or convertible preferred stock (CPS). The value
//! object is immutable once built; pricing never mutates it.

use chimera_core::types::Date;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConvertibleError, ConvertibleResult};

/// Classification of a hybrid convertible security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityType {
    /// Redeemable convertible preferred stock.
    #[serde(rename = "RCPS")]
    Rcps,
    /// Convertible bond.
    #[serde(rename = "CB")]
    ConvertibleBond,
    /// Convertible preferred stock.
    #[serde(rename = "CPS")]
    Cps,
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SecurityType::Rcps => "RCPS",
            SecurityType::ConvertibleBond => "CB",
            SecurityType::Cps => "CPS",
        };
        write!(f, "{s}")
    }
}

/// IPO-conditional refixing event.
///
/// If the stock trades below `threshold_price` on (or after) `check_date`,
/// the conversion price is adjusted downward to
/// `max(refix_floor, conversion_price * failure_refix_ratio)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IpoRefixing {
    /// Date on which the IPO outcome is checked.
    pub check_date: Date,
    /// Stock price below which the refixing triggers.
    pub threshold_price: f64,
    /// Multiplier applied to the conversion price on failure, in (0, 1].
    pub failure_refix_ratio: f64,
}

/// A hybrid convertible security specification.
///
/// All monetary fields are in a single caller-chosen unit. The specification
/// is validated as a whole by [`HybridSecurity::validate`]; the pricer calls
/// this before any lattice construction.
///
/// # Example
///
/// ```rust
/// use chimera_convertibles::instruments::HybridSecurity;
/// use chimera_core::types::Date;
///
/// let security = HybridSecurity::builder("SERIES-B-RCPS")
///     .valuation_date(Date::from_ymd(2025, 6, 15).unwrap())
///     .maturity_years(3.0)
///     .current_stock_price(20_000.0)
///     .conversion_price(25_000.0)
///     .face_value(50_000.0)
///     .num_shares(10_000.0)
///     .build()
///     .unwrap();
///
/// assert!(security.redemption_value() > security.face_value);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridSecurity {
    /// Identifier of the issue (deal name, series label, ...).
    pub security_id: String,
    /// RCPS / CB / CPS classification.
    pub security_type: SecurityType,

    /// Date as of which the security is valued.
    pub valuation_date: Date,
    /// Contractual maturity date.
    pub maturity_date: Date,

    /// Current stock price (S0).
    pub current_stock_price: f64,
    /// Annualized stock volatility.
    pub volatility: f64,
    /// Continuously compounded risk-free rate.
    pub risk_free_rate: f64,
    /// Issuer credit spread over the risk-free rate.
    pub credit_spread: f64,

    /// Initial conversion price (K0).
    pub conversion_price: f64,
    /// Face value per unit.
    pub face_value: f64,
    /// Redemption premium over face at maturity (0.05 = 5%).
    pub redemption_premium: f64,
    /// Lower bound on any adjusted conversion price.
    pub refix_floor: f64,

    /// Stated total issue amount.
    pub total_amount: f64,
    /// Number of units issued.
    pub num_shares: f64,

    /// Optional IPO-conditional refixing event.
    pub ipo_refixing: Option<IpoRefixing>,
}

impl HybridSecurity {
    /// Creates a builder for the security with the given identifier.
    #[must_use]
    pub fn builder(security_id: impl Into<String>) -> HybridSecurityBuilder {
        HybridSecurityBuilder::new(security_id)
    }

    /// Redemption amount per unit at maturity: face value plus premium.
    #[must_use]
    pub fn redemption_value(&self) -> f64 {
        self.face_value * (1.0 + self.redemption_premium)
    }

    /// Shares received per unit at the initial conversion price.
    #[must_use]
    pub fn conversion_ratio(&self) -> f64 {
        self.face_value / self.conversion_price
    }

    /// Issue notional implied by the per-unit terms.
    #[must_use]
    pub fn implied_amount(&self) -> f64 {
        self.face_value * self.num_shares
    }

    /// Validates the specification.
    ///
    /// All input validation happens here, up front; pricing fails fast on the
    /// first violation and never silently degrades to a zero-value result.
    ///
    /// # Errors
    ///
    /// Returns `ConvertibleError::InvalidSpec` describing the first violation.
    pub fn validate(&self) -> ConvertibleResult<()> {
        require_positive_finite(self.current_stock_price, "current_stock_price")?;
        require_positive_finite(self.conversion_price, "conversion_price")?;
        require_positive_finite(self.volatility, "volatility")?;
        require_positive_finite(self.face_value, "face_value")?;
        require_positive_finite(self.num_shares, "num_shares")?;
        require_finite(self.risk_free_rate, "risk_free_rate")?;
        require_finite(self.total_amount, "total_amount")?;

        if !self.credit_spread.is_finite() || self.credit_spread < 0.0 {
            return Err(ConvertibleError::invalid_spec(
                "credit_spread must be non-negative",
            ));
        }
        if !self.redemption_premium.is_finite() || self.redemption_premium < 0.0 {
            return Err(ConvertibleError::invalid_spec(
                "redemption_premium must be non-negative",
            ));
        }
        if !self.refix_floor.is_finite() || self.refix_floor < 0.0 {
            return Err(ConvertibleError::invalid_spec(
                "refix_floor must be non-negative",
            ));
        }
        if self.maturity_date < self.valuation_date {
            return Err(ConvertibleError::invalid_spec(format!(
                "maturity_date {} is before valuation_date {}",
                self.maturity_date, self.valuation_date
            )));
        }

        if let Some(refix) = &self.ipo_refixing {
            if !refix.threshold_price.is_finite() || refix.threshold_price <= 0.0 {
                return Err(ConvertibleError::invalid_spec(
                    "refixing threshold_price must be positive",
                ));
            }
            if !refix.failure_refix_ratio.is_finite()
                || refix.failure_refix_ratio <= 0.0
                || refix.failure_refix_ratio > 1.0
            {
                return Err(ConvertibleError::invalid_spec(
                    "failure_refix_ratio must be in (0, 1]",
                ));
            }
            if refix.check_date < self.valuation_date || refix.check_date > self.maturity_date {
                return Err(ConvertibleError::invalid_spec(format!(
                    "refixing check_date {} is outside [{}, {}]",
                    refix.check_date, self.valuation_date, self.maturity_date
                )));
            }
            // An adjusted conversion price must never exceed the initial one.
            if self.refix_floor > self.conversion_price {
                return Err(ConvertibleError::invalid_spec(
                    "refix_floor must not exceed conversion_price",
                ));
            }
        }

        Ok(())
    }
}

fn require_positive_finite(value: f64, field: &str) -> ConvertibleResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConvertibleError::invalid_spec(format!(
            "{field} must be positive"
        )));
    }
    Ok(())
}

fn require_finite(value: f64, field: &str) -> ConvertibleResult<()> {
    if !value.is_finite() {
        return Err(ConvertibleError::invalid_spec(format!(
            "{field} must be finite"
        )));
    }
    Ok(())
}

/// Builder for [`HybridSecurity`].
///
/// Supplies the market defaults commonly used for quick RCPS valuations:
/// 35% volatility, 3.5% risk-free rate, 2.0% credit spread, 5% redemption
/// premium, and a refixing floor at 70% of the conversion price. Required
/// fields are the stock price, conversion price, face value, unit count, and
/// a maturity (date or year count).
#[derive(Debug, Clone)]
pub struct HybridSecurityBuilder {
    security_id: String,
    security_type: SecurityType,
    valuation_date: Option<Date>,
    maturity_date: Option<Date>,
    maturity_years: Option<f64>,
    current_stock_price: Option<f64>,
    volatility: f64,
    risk_free_rate: f64,
    credit_spread: f64,
    conversion_price: Option<f64>,
    face_value: Option<f64>,
    redemption_premium: f64,
    refix_floor: Option<f64>,
    total_amount: Option<f64>,
    num_shares: Option<f64>,
    ipo_refixing: Option<IpoRefixing>,
}

impl HybridSecurityBuilder {
    /// Creates a new builder for the given security identifier.
    #[must_use]
    pub fn new(security_id: impl Into<String>) -> Self {
        Self {
            security_id: security_id.into(),
            security_type: SecurityType::Rcps,
            valuation_date: None,
            maturity_date: None,
            maturity_years: None,
            current_stock_price: None,
            volatility: 0.35,
            risk_free_rate: 0.035,
            credit_spread: 0.020,
            conversion_price: None,
            face_value: None,
            redemption_premium: 0.05,
            refix_floor: None,
            total_amount: None,
            num_shares: None,
            ipo_refixing: None,
        }
    }

    /// Sets the security type (defaults to RCPS).
    #[must_use]
    pub fn security_type(mut self, security_type: SecurityType) -> Self {
        self.security_type = security_type;
        self
    }

    /// Sets the valuation date (defaults to today).
    #[must_use]
    pub fn valuation_date(mut self, date: Date) -> Self {
        self.valuation_date = Some(date);
        self
    }

    /// Sets the maturity date explicitly.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Derives the maturity date from the valuation date at 365 days/year.
    ///
    /// Ignored when [`maturity_date`](Self::maturity_date) is also set.
    #[must_use]
    pub fn maturity_years(mut self, years: f64) -> Self {
        self.maturity_years = Some(years);
        self
    }

    /// Sets the current stock price (S0).
    #[must_use]
    pub fn current_stock_price(mut self, price: f64) -> Self {
        self.current_stock_price = Some(price);
        self
    }

    /// Sets the annualized volatility (defaults to 35%).
    #[must_use]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Sets the risk-free rate (defaults to 3.5%).
    #[must_use]
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the credit spread (defaults to 2.0%).
    #[must_use]
    pub fn credit_spread(mut self, spread: f64) -> Self {
        self.credit_spread = spread;
        self
    }

    /// Sets the initial conversion price (K0).
    #[must_use]
    pub fn conversion_price(mut self, price: f64) -> Self {
        self.conversion_price = Some(price);
        self
    }

    /// Sets the face value per unit.
    #[must_use]
    pub fn face_value(mut self, face: f64) -> Self {
        self.face_value = Some(face);
        self
    }

    /// Sets the redemption premium (defaults to 5%).
    #[must_use]
    pub fn redemption_premium(mut self, premium: f64) -> Self {
        self.redemption_premium = premium;
        self
    }

    /// Sets the refixing floor (defaults to 70% of the conversion price).
    #[must_use]
    pub fn refix_floor(mut self, floor: f64) -> Self {
        self.refix_floor = Some(floor);
        self
    }

    /// Sets the stated total issue amount (defaults to face × units).
    #[must_use]
    pub fn total_amount(mut self, amount: f64) -> Self {
        self.total_amount = Some(amount);
        self
    }

    /// Sets the number of units issued.
    #[must_use]
    pub fn num_shares(mut self, shares: f64) -> Self {
        self.num_shares = Some(shares);
        self
    }

    /// Attaches an IPO-conditional refixing event.
    #[must_use]
    pub fn ipo_refixing(mut self, refixing: IpoRefixing) -> Self {
        self.ipo_refixing = Some(refixing);
        self
    }

    /// Builds and validates the security.
    ///
    /// # Errors
    ///
    /// Returns `ConvertibleError::InvalidSpec` when a required field is
    /// missing or the assembled security fails validation.
    pub fn build(self) -> ConvertibleResult<HybridSecurity> {
        let current_stock_price = self
            .current_stock_price
            .ok_or_else(|| missing("current_stock_price"))?;
        let conversion_price = self
            .conversion_price
            .ok_or_else(|| missing("conversion_price"))?;
        let face_value = self.face_value.ok_or_else(|| missing("face_value"))?;
        let num_shares = self.num_shares.ok_or_else(|| missing("num_shares"))?;

        let valuation_date = self.valuation_date.unwrap_or_else(Date::today);
        let maturity_date = match (self.maturity_date, self.maturity_years) {
            (Some(date), _) => date,
            (None, Some(years)) => {
                if !years.is_finite() || years < 0.0 {
                    return Err(ConvertibleError::invalid_spec(
                        "maturity_years must be non-negative",
                    ));
                }
                valuation_date.add_days((years * 365.0).round() as i64)
            }
            (None, None) => return Err(missing("maturity_date")),
        };

        let security = HybridSecurity {
            security_id: self.security_id,
            security_type: self.security_type,
            valuation_date,
            maturity_date,
            current_stock_price,
            volatility: self.volatility,
            risk_free_rate: self.risk_free_rate,
            credit_spread: self.credit_spread,
            conversion_price,
            face_value,
            redemption_premium: self.redemption_premium,
            refix_floor: self.refix_floor.unwrap_or(conversion_price * 0.70),
            total_amount: self.total_amount.unwrap_or(face_value * num_shares),
            num_shares,
            ipo_refixing: self.ipo_refixing,
        };

        security.validate()?;
        Ok(security)
    }
}

fn missing(field: &str) -> ConvertibleError {
    ConvertibleError::invalid_spec(format!("missing required field: {field}"))
}
