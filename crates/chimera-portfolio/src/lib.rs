//! # Chimera Portfolio
//!
//! Portfolio aggregation over convertible hybrid security valuations.
//!
//! This crate prices a set of [`chimera_convertibles::HybridSecurity`]
//! specifications independently and aggregates the fair-value split across
//! the portfolio.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: all calculations are stateless with explicit inputs
//! - **Independent securities**: no cross-security state and no tranche
//!   interaction modeling, which makes pricing embarrassingly parallel
//! - **Config-driven parallelism**: optional rayon support with a
//!   threshold-based switch
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chimera_portfolio::prelude::*;
//!
//! let pricer = PortfolioPricer::new()
//!     .with_pricer(ConvertiblePricer::new().with_max_steps(300))
//!     .with_config(PricingConfig::default());
//!
//! let valuation = pricer.price_many(&securities)?;
//! println!(
//!     "total {} = debt {} + equity {}",
//!     valuation.total_value, valuation.debt_component, valuation.equity_component
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: enable rayon-based parallel pricing for large portfolios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod parallel;
pub mod pricer;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::PricingConfig;
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::pricer::{PortfolioPricer, PortfolioValuation};
    pub use chimera_convertibles::pricing::ConvertiblePricer;
    pub use chimera_convertibles::{HybridSecurity, IpoRefixing, SecurityType};
}

// Re-export error types at crate root
pub use config::PricingConfig;
pub use error::{PortfolioError, PortfolioResult};
pub use pricer::{PortfolioPricer, PortfolioValuation};
