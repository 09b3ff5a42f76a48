//! Mathematical building blocks shared by the pricing models.
//!
//! - [`distributions`]: standard normal CDF and density
//! - [`solvers`]: root finding for early-exercise boundaries

pub mod distributions;
pub mod solvers;
