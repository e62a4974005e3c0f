//! Date-addressable time discretization.

use chimera_core::daycounts::{Act365Fixed, DayCount};
use chimera_core::types::Date;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ConvertibleError, ConvertibleResult};

/// A bounded, date-addressable discretization of the valuation horizon.
///
/// The grid takes one step per calendar day, capped at `max_steps` to bound
/// the O(N²) lattice cost for long maturities. Each step maps back to a
/// calendar date by linear interpolation of the day offset, which gives the
/// refixing trigger date-exact evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    valuation_date: Date,
    maturity_date: Date,
    calendar_days: i64,
    steps: usize,
    years: f64,
    dt: f64,
}

impl TimeGrid {
    /// Builds a grid from the valuation date to the maturity date.
    ///
    /// # Errors
    ///
    /// Returns `ConvertibleError::InvalidSpec` if the maturity is not after
    /// the valuation date, or if `max_steps` is zero.
    pub fn new(
        valuation_date: Date,
        maturity_date: Date,
        max_steps: usize,
    ) -> ConvertibleResult<Self> {
        let calendar_days = valuation_date.days_between(&maturity_date);
        if calendar_days <= 0 {
            return Err(ConvertibleError::invalid_spec(format!(
                "maturity_date {maturity_date} must be after valuation_date {valuation_date}"
            )));
        }
        if max_steps == 0 {
            return Err(ConvertibleError::invalid_spec("max_steps must be positive"));
        }

        let steps = usize::try_from(calendar_days)
            .unwrap_or(usize::MAX)
            .min(max_steps);
        let years = Act365Fixed
            .year_fraction(valuation_date, maturity_date)
            .to_f64()
            .unwrap_or(0.0);
        let dt = years / steps as f64;

        Ok(Self {
            valuation_date,
            maturity_date,
            calendar_days,
            steps,
            years,
            dt,
        })
    }

    /// Returns the valuation date (step 0).
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the maturity date (final step).
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the number of calendar days spanned by the grid.
    #[must_use]
    pub fn calendar_days(&self) -> i64 {
        self.calendar_days
    }

    /// Returns the number of time steps N.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the horizon in ACT/365F years.
    #[must_use]
    pub fn years(&self) -> f64 {
        self.years
    }

    /// Returns the year fraction of a single step.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Maps a step index to its calendar date.
    ///
    /// Linear interpolation of the day offset, rounded to the nearest day;
    /// step 0 is the valuation date and step N the maturity date.
    #[must_use]
    pub fn date_at(&self, step: usize) -> Date {
        let fraction = step as f64 / self.steps as f64;
        let offset = (fraction * self.calendar_days as f64).round() as i64;
        self.valuation_date.add_days(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_steps_below_cap() {
        let grid = TimeGrid::new(date(2025, 6, 15), date(2025, 9, 15), 300).unwrap();
        assert_eq!(grid.calendar_days(), 92);
        assert_eq!(grid.steps(), 92);
        assert!((grid.years() - 92.0 / 365.0).abs() < 1e-12);
        assert!((grid.dt() - grid.years() / 92.0).abs() < 1e-15);
    }

    #[test]
    fn test_steps_capped() {
        let grid = TimeGrid::new(date(2025, 6, 15), date(2028, 6, 15), 300).unwrap();
        assert_eq!(grid.calendar_days(), 1096);
        assert_eq!(grid.steps(), 300);
        assert!((grid.dt() - grid.years() / 300.0).abs() < 1e-15);
    }

    #[test]
    fn test_date_mapping_endpoints() {
        let grid = TimeGrid::new(date(2025, 6, 15), date(2028, 6, 15), 300).unwrap();
        assert_eq!(grid.date_at(0), date(2025, 6, 15));
        assert_eq!(grid.date_at(grid.steps()), date(2028, 6, 15));
    }

    #[test]
    fn test_date_mapping_is_monotone() {
        let grid = TimeGrid::new(date(2025, 6, 15), date(2028, 6, 15), 300).unwrap();
        let mut previous = grid.date_at(0);
        for step in 1..=grid.steps() {
            let current = grid.date_at(step);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_uncapped_date_mapping_is_daily() {
        let grid = TimeGrid::new(date(2025, 6, 15), date(2025, 7, 15), 300).unwrap();
        for step in 0..=grid.steps() {
            assert_eq!(grid.date_at(step), date(2025, 6, 15).add_days(step as i64));
        }
    }

    #[test]
    fn test_rejects_inverted_or_flat_horizon() {
        assert!(TimeGrid::new(date(2025, 6, 15), date(2025, 6, 15), 300).is_err());
        assert!(TimeGrid::new(date(2025, 6, 15), date(2025, 6, 14), 300).is_err());
    }

    #[test]
    fn test_rejects_zero_max_steps() {
        assert!(TimeGrid::new(date(2025, 6, 15), date(2026, 6, 15), 0).is_err());
    }
}
