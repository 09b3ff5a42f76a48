//! Range calculation errors.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors from a range sweep.
#[derive(Debug, Error)]
pub enum RangeError {
    /// Malformed range bounds or step.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The grid exceeds the configured point limit.
    #[error("Range of {points} grid points exceeds the limit of {max}")]
    TooManyPoints {
        /// Points the range would produce
        points: usize,
        /// Configured limit
        max: usize,
    },

    /// A grid-point valuation failed; the sweep was aborted.
    #[error("Valuation failed at grid point {index} (value {value}): {source}")]
    Pricing {
        /// Position in the grid
        index: usize,
        /// Grid value in request units
        value: f64,
        /// Underlying model error
        #[source]
        source: PricingError,
    },

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl RangeError {
    /// Returns `true` for errors caused by the caller's request.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            RangeError::InvalidRange(_) | RangeError::TooManyPoints { .. } => true,
            RangeError::Pricing { source, .. } => source.is_invalid_input(),
            RangeError::ThreadPool(_) => false,
        }
    }

    /// The model error behind a failed grid point, if any.
    pub fn pricing_error(&self) -> Option<&PricingError> {
        match self {
            RangeError::Pricing { source, .. } => Some(source),
            _ => None,
        }
    }
}
