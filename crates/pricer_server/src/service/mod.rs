//! Pricing service layer.
//!
//! - `request`: request payloads, validation and unit conversion
//! - `pricing`: model resolution, valuations and range sweeps
//! - `performance`: range calculation timing

pub mod performance;
mod pricing;
pub mod request;

pub use performance::{PerformanceSnapshot, PerformanceTracker};
pub use pricing::PricingService;
pub use request::{PricingRequest, RangeParams, RangeRequest, Valuation};
