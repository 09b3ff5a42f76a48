//! # pricer_core: Numeric Foundation for the Option Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Standard normal distribution functions (`math::distributions`)
//! - Newton-Raphson root finding (`math::solvers`)
//! - Market input sets and option configuration (`types::inputs`, `types::option`)
//! - Valuation results and ordered result sets (`types::result`)
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//! - The shared pricing model contract (`traits::model`)
//!
//! ## Architecture
//!
//! ```text
//! pricer_server   (HTTP service, configuration, performance tracking)
//!       |
//! pricer_risk     (range calculation engine, worker pool)
//!       |
//! pricer_models   (Black-Scholes, Barone-Adesi-Whaley, binomial, Monte Carlo)
//!       |
//! pricer_core     (this crate)
//! ```
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Generic numerical computation in the solvers
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional, enabled by default)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::{InputField, MarketInputSet};
//!
//! let inputs = MarketInputSet::new()
//!     .with(InputField::Strike, 100.0)
//!     .with(InputField::UnderlyingPrice, 105.0)
//!     .with(InputField::Volatility, 0.2)
//!     .with(InputField::TimeToExpiry, 0.5)
//!     .with(InputField::InterestRate, 0.05);
//!
//! let params = inputs.params().unwrap();
//! assert_eq!(params.day_count, 250.0);
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for inputs, configurations and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
