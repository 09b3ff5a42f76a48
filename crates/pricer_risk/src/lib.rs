//! # Pricer Risk (L3: Range Calculations)
//!
//! Sensitivity sweeps: value one option across a grid of a single input and
//! collect the results in grid order.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L3)             │
//! ├─────────────────────────────────────────┤
//! │  range/  - RangeSpec (grid)             │
//! │          - RangeCalculationEngine       │
//! │            (Arc<rayon::ThreadPool>)     │
//! └─────────────────────────────────────────┘
//!          ↓  one valuation per grid point
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  European, American, Binomial, MC       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The worker pool is built once and injected; sweeps never touch the rayon
//! global pool. Parallelism is applied across grid points only, a single
//! valuation always runs on one thread.
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{InputField, MarketInputSet, OptionConfig, ResultSet};
//! use pricer_models::lattice::BinomialTree;
//! use pricer_risk::range::{RangeCalculation, RangeCalculationEngine, RangeSpec};
//!
//! let engine = RangeCalculationEngine::with_threads(2).unwrap();
//! let base = MarketInputSet::new()
//!     .with(InputField::Strike, 100.0)
//!     .with(InputField::UnderlyingPrice, 100.0)
//!     .with(InputField::Volatility, 0.2)
//!     .with(InputField::TimeToExpiry, 1.0)
//!     .with(InputField::InterestRate, 0.05);
//!
//! let mut results = ResultSet::new();
//! BinomialTree::new(100)
//!     .calculate_range(
//!         &engine,
//!         &mut results,
//!         OptionConfig::american_put(),
//!         &base,
//!         &RangeSpec::new(InputField::Strike, 90.0, 110.0, 10.0),
//!     )
//!     .unwrap();
//!
//! assert_eq!(results.len(), 3);
//! assert!(results.results()[0].price < results.results()[2].price);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod range;

pub use range::{
    RangeCalculation, RangeCalculationEngine, RangeError, RangeSpec, RangeSweepStats,
    DEFAULT_MAX_GRID_POINTS,
};
