//! Core traits shared across the pricing layers.
//!
//! - [`Float`]: generic floating-point operations (re-exported from num-traits)
//! - [`PricingModel`]: the capability set every pricing model provides
//!
//! Models are dispatched through an enum in `pricer_models`; the trait exists
//! so the range engine can be written once for every model.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod model;

pub use model::PricingModel;
