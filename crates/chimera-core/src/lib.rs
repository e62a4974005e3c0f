//! # Chimera Core
//!
//! Core types, day counts, and error handling for the Chimera convertible
//! valuation library.
//!
//! This crate provides the foundational building blocks used throughout
//! Chimera:
//!
//! - **Types**: Domain-specific types like [`types::Date`]
//! - **Day Count Conventions**: Year fraction calculations for discounting
//! - **Errors**: Structured error handling with context
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use chimera_core::prelude::*;
//!
//! let valuation = Date::from_ymd(2025, 6, 15).unwrap();
//! let maturity = valuation.add_years(3).unwrap();
//! let years = Act365Fixed.year_fraction(valuation, maturity);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act365Fixed, DayCount};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
