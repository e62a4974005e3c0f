//! Portfolio pricing configuration.

use serde::{Deserialize, Serialize};

/// Default number of securities above which pricing fans out in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

/// Configuration for portfolio pricing.
///
/// Controls the conditional parallelism of [`crate::PortfolioPricer`]:
/// per-security pricing is embarrassingly parallel (no shared state), so
/// large portfolios fan out across rayon workers when the `parallel` feature
/// is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Whether parallel pricing is allowed at all.
    pub parallel: bool,
    /// Minimum number of securities before fanning out.
    pub parallel_threshold: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl PricingConfig {
    /// A configuration that always prices sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            parallel_threshold: usize::MAX,
        }
    }

    /// Overrides the parallel threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if a collection of the given size should be processed in
    /// parallel (subject to the `parallel` feature being enabled).
    #[must_use]
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.parallel && len >= self.parallel_threshold
    }
}
