//! Day count conventions for valuation date arithmetic.
//!
//! Day count conventions determine how calendar spans are converted into
//! year fractions for discounting and lattice construction.
//!
//! # Supported Conventions
//!
//! - [`Act365Fixed`]: Actual/365 Fixed - the convention used throughout the
//!   convertible lattice (daily steps over a 365-day year basis)
//!
//! # Usage
//!
//! ```rust
//! use chimera_core::daycounts::{Act365Fixed, DayCount};
//! use chimera_core::types::Date;
//!
//! let dc = Act365Fixed;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2028, 1, 15).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! ```

mod act365;

pub use act365::Act365Fixed;

use crate::types::Date;
use rust_decimal::Decimal;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Counts the days between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}
