//! Error types for portfolio operations.

use chimera_convertibles::ConvertibleError;
use thiserror::Error;

/// A specialized Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio pricing.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// Pricing one of the securities failed.
    ///
    /// Any failure fails the whole portfolio call; partial aggregates are
    /// never returned.
    #[error("Pricing failed for {security_id}: {source}")]
    SecurityPricingFailed {
        /// Identifier of the security that failed.
        security_id: String,
        /// The underlying pricing error.
        #[source]
        source: ConvertibleError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_security_id() {
        let err = PortfolioError::SecurityPricingFailed {
            security_id: "DEAL-7".to_string(),
            source: ConvertibleError::invalid_spec("volatility must be positive"),
        };
        assert!(err.to_string().contains("DEAL-7"));
        assert!(err.to_string().contains("volatility"));
    }
}
