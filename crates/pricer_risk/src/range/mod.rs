//! Range calculations: one valuation per point of a swept input.
//!
//! - [`RangeSpec`]: which field to sweep and over which grid
//! - [`RangeCalculationEngine`]: fans the grid out over a shared worker pool
//!   and merges results in grid order
//! - [`RangeCalculation`]: `calculate_range` on any [`PricingModel`]
//!
//! [`PricingModel`]: pricer_core::traits::PricingModel

mod engine;
mod error;
mod spec;

pub use engine::{RangeCalculation, RangeCalculationEngine, RangeSweepStats, DEFAULT_MAX_GRID_POINTS};
pub use error::RangeError;
pub use spec::RangeSpec;
