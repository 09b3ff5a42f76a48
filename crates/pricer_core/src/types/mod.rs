//! Core value types for the pricing engine.
//!
//! This module provides:
//! - `inputs`: Market input sets keyed by [`InputField`] and resolved [`MarketParams`]
//! - `option`: Per-valuation option configuration ([`OptionConfig`])
//! - `result`: Valuation results and ordered result sets
//! - `error`: Structured error types for pricing and solver operations

pub mod error;
pub mod inputs;
pub mod option;
pub mod result;

pub use error::{PricingError, SolverError};
pub use inputs::{InputField, MarketInputSet, MarketParams, DEFAULT_DAY_COUNT_CONVENTION};
pub use option::{ExerciseStyle, OptionConfig, OptionType};
pub use result::{Greeks, ResultSet, ValuationResult};
