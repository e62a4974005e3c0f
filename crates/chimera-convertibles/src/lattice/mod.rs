//! Lattice machinery for convertible valuation.
//!
//! This module provides the date-addressable time grid, the CRR up/down
//! factors with split discount factors, the recombining grid storage, and the
//! forward-pass builders for the stock-price and conversion-price trees.
//!
//! # Overview
//!
//! Valuation runs on a recombining binomial lattice with (close to) daily
//! steps. The forward pass fills a stock-price grid and a parallel
//! conversion-price grid; the backward induction over both lives in
//! [`crate::pricing`].
//!
//! # Example
//!
//! ```rust,ignore
//! use chimera_convertibles::lattice::{CrrFactors, TimeGrid};
//!
//! let time = TimeGrid::new(valuation, maturity, 300)?;
//! let factors = CrrFactors::derive(0.35, 0.035, 0.02, time.dt())?;
//! let stock = build_stock_tree(&time, &factors, 20_000.0);
//! ```

mod factors;
mod grid;
mod time_grid;
mod trees;

pub use factors::CrrFactors;
pub use grid::LatticeGrid;
pub use time_grid::TimeGrid;
pub use trees::{build_conversion_tree, build_stock_tree};
