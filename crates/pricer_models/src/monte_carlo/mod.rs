//! Monte Carlo simulation under geometric Brownian motion.
//!
//! - [`PricerRng`]: seedable normal variate source
//! - [`MonteCarlo`]: terminal-price simulation model with finite-difference Greeks

mod rng;
mod simulation;

pub use rng::PricerRng;
pub use simulation::{MonteCarlo, SimulationEstimate, DEFAULT_PATHS};
