//! Error types for convertible security valuation.

use thiserror::Error;

/// A specialized Result type for convertible valuation operations.
pub type ConvertibleResult<T> = Result<T, ConvertibleError>;

/// Errors that can occur during convertible security valuation.
#[derive(Error, Debug, Clone)]
pub enum ConvertibleError {
    /// Invalid security specification.
    ///
    /// Raised by up-front validation, before any lattice work begins.
    #[error("Invalid security specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Risk-neutral probability fell outside the open interval (0, 1).
    ///
    /// Unreachable for validated inputs, but checked rather than assumed.
    #[error("Risk-neutral probability {probability} is outside (0, 1)")]
    ProbabilityOutOfRange {
        /// The offending probability.
        probability: f64,
    },

    /// A non-finite value appeared during backward induction.
    ///
    /// The pricing call aborts; partial results are never returned.
    #[error("Non-finite value at lattice node ({step}, {state})")]
    NonFiniteValue {
        /// Time step of the offending node.
        step: usize,
        /// State index of the offending node.
        state: usize,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] chimera_core::CoreError),
}

impl ConvertibleError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }
}
