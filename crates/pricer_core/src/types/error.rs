//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors surfaced by valuations and range sweeps
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

use super::inputs::InputField;

/// Categorised pricing errors.
///
/// The taxonomy has two kinds:
/// - `InvalidInput`: malformed or out-of-range request data, or an input set
///   missing a required field. The caller is responsible for rejecting these
///   before they reach a model.
/// - `Calculation`: a numerical failure inside a model. Always carries the
///   identifier of the model that produced it.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Strike price must be greater than 0".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Strike price must be greater than 0");
///
/// let err = PricingError::calculation("binomial", "non-finite price");
/// assert_eq!(err.model(), Some("binomial"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical failure inside a model
    #[error("Calculation error in {model}: {message}")]
    Calculation {
        /// Identifier of the model that failed
        model: String,
        /// Description of the failure
        message: String,
    },
}

impl PricingError {
    /// Create a calculation error attributed to `model`.
    pub fn calculation(model: impl Into<String>, message: impl Into<String>) -> Self {
        PricingError::Calculation {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create the error reported when an input set lacks a required field.
    pub fn missing_field(field: InputField) -> Self {
        PricingError::InvalidInput(format!("missing required input field '{}'", field))
    }

    /// Returns `true` for errors the caller caused.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PricingError::InvalidInput(_))
    }

    /// Identifier of the failing model, if the error came from one.
    pub fn model(&self) -> Option<&str> {
        match self {
            PricingError::Calculation { model, .. } => Some(model),
            PricingError::InvalidInput(_) => None,
        }
    }
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = PricingError::InvalidInput("Increment must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: Increment must be positive");
        assert!(err.is_invalid_input());
        assert_eq!(err.model(), None);
    }

    #[test]
    fn test_calculation_error_carries_model() {
        let err = PricingError::calculation("monte_carlo", "price is NaN");
        assert_eq!(
            err.to_string(),
            "Calculation error in monte_carlo: price is NaN"
        );
        assert!(!err.is_invalid_input());
        assert_eq!(err.model(), Some("monte_carlo"));
    }

    #[test]
    fn test_missing_field_message() {
        let err = PricingError::missing_field(InputField::UnderlyingPrice);
        assert_eq!(
            err,
            PricingError::InvalidInput(
                "missing required input field 'underlyingPrice'".to_string()
            )
        );
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::DerivativeNearZero { x: 1.5 };
        assert_eq!(err.to_string(), "Derivative near zero at x = 1.5");
    }
}
