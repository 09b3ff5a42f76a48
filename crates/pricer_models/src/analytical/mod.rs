//! Closed-form option pricing.
//!
//! - [`EuropeanBlackScholes`]: Black-Scholes prices with analytical Greeks
//! - [`AmericanBlackScholes`]: Barone-Adesi-Whaley approximation for early
//!   exercise
//!
//! [`BlackScholes`] is the shared kernel: it caches d₁, d₂ and the discount
//! factor for one set of market parameters.

pub mod barone_adesi_whaley;
pub mod black_scholes;

pub use barone_adesi_whaley::{AmericanBlackScholes, DEFAULT_MAX_ITERATIONS};
pub use black_scholes::{BlackScholes, EuropeanBlackScholes};
