//! Valuation engine and pricer for convertible hybrid securities.
//!
//! This module provides:
//!
//! - **Split-Value Engine**: backward induction maintaining a (debt, equity)
//!   value pair per node with Tsiveriotis-Fernandes split discounting
//! - **Pricer**: orchestration from a [`crate::instruments::HybridSecurity`]
//!   to a [`ValuationResult`]
//! - **Trace**: an optional ordered record of per-step intermediate values
//!   replacing ad hoc console audit trails
//!
//! # Example
//!
//! ```rust,ignore
//! use chimera_convertibles::pricing::ConvertiblePricer;
//!
//! let pricer = ConvertiblePricer::new();
//! let result = pricer.price(&security)?;
//! println!("fair value: {}", result.total_value);
//! ```

mod engine;
mod pricer;
mod result;
mod trace;

pub use engine::{SplitSurfaces, SplitValueEngine};
pub use pricer::{ConvertiblePricer, DEFAULT_MAX_STEPS};
pub use result::{LatticeParams, ValuationResult, ValuationWarning};
pub use trace::{TraceNode, TraceStep, ValuationTrace};
