//! # Chimera Convertibles
//!
//! Tsiveriotis-Fernandes lattice pricing for convertible hybrid securities.
//!
//! This crate prices hybrid convertible securities issued by private and
//! growth companies (redeemable convertible preferred stock, convertible
//! bonds, convertible preferred stock), splitting fair value into:
//!
//! - a **debt/host component** discounted at the credit-risky rate, and
//! - an **equity/option component** discounted at the risk-free rate,
//!
//! following Tsiveriotis & Fernandes (1998), "Valuing convertible bonds with
//! credit risk", *Journal of Fixed Income* 8(2).
//!
//! ## Features
//!
//! - **Date-adaptive CRR lattice**: one step per calendar day, capped for
//!   long maturities
//! - **IPO-conditional refixing**: a single scheduled downward conversion
//!   price adjustment, evaluated date-exactly per node
//! - **American-style early conversion** with an explicit hold-on-tie rule
//! - **Structured trace** of per-node intermediate values for audit and
//!   testing
//!
//! ## Example
//!
//! ```rust
//! use chimera_convertibles::prelude::*;
//! use chimera_core::types::Date;
//!
//! let security = HybridSecurity::builder("SERIES-B-RCPS")
//!     .valuation_date(Date::from_ymd(2025, 6, 15).unwrap())
//!     .maturity_years(3.0)
//!     .current_stock_price(20_000.0)
//!     .conversion_price(25_000.0)
//!     .face_value(50_000.0)
//!     .num_shares(10_000.0)
//!     .build()
//!     .unwrap();
//!
//! let result = ConvertiblePricer::new().price(&security).unwrap();
//! assert!(result.equity_component > 0.0);
//! assert!(result.split_ratio > 0.0 && result.split_ratio < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod instruments;
pub mod lattice;
pub mod pricing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConvertibleError, ConvertibleResult};
    pub use crate::instruments::{
        HybridSecurity, HybridSecurityBuilder, IpoRefixing, SecurityType,
    };
    pub use crate::lattice::{CrrFactors, LatticeGrid, TimeGrid};
    pub use crate::pricing::{
        ConvertiblePricer, LatticeParams, ValuationResult, ValuationTrace, ValuationWarning,
        DEFAULT_MAX_STEPS,
    };
}

// Re-export commonly used types at crate root
pub use error::{ConvertibleError, ConvertibleResult};
pub use instruments::{HybridSecurity, IpoRefixing, SecurityType};
pub use pricing::{ConvertiblePricer, ValuationResult};
