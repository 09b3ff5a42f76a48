//! Terminal-price Monte Carlo under geometric Brownian motion.
//!
//! For each of M draws `z ~ N(0, 1)`:
//!
//! ```text
//! S_T = S · exp((r − σ²/2)·T + σ·√T·z)
//! ```
//!
//! and the price is the mean of the discounted payoffs `e^(−rT)·max(±(S_T − K), 0)`.
//! Vanilla payoffs depend only on `S_T`, so one step per path is exact.
//!
//! Greeks come from central finite differences, each bump running a fresh
//! M-path simulation. Bumped estimates share no random numbers, so Greek
//! noise scales with the price standard error divided by the bump size.

use pricer_core::traits::PricingModel;
use pricer_core::types::{
    MarketInputSet, MarketParams, OptionConfig, PricingError, ValuationResult,
};

use super::rng::PricerRng;
use crate::greeks::FiniteDifference;

/// Default number of simulated paths.
pub const DEFAULT_PATHS: usize = 100_000;

/// Price estimate with its sampling error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationEstimate {
    /// Mean discounted payoff
    pub price: f64,
    /// Standard error of the mean
    pub std_error: f64,
}

impl SimulationEstimate {
    /// 95% confidence half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Monte Carlo pricing model.
///
/// Exercise style is ignored: American options are priced as European.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputField, MarketInputSet, OptionConfig};
/// use pricer_models::monte_carlo::{MonteCarlo, PricerRng};
///
/// let params = MarketInputSet::new()
///     .with(InputField::Strike, 100.0)
///     .with(InputField::UnderlyingPrice, 100.0)
///     .with(InputField::Volatility, 0.2)
///     .with(InputField::TimeToExpiry, 1.0)
///     .with(InputField::InterestRate, 0.05)
///     .params()
///     .unwrap();
///
/// let mc = MonteCarlo::new(50_000);
/// let mut rng = PricerRng::from_seed(42);
/// let estimate = mc.simulate(OptionConfig::european_call(), &params, &mut rng);
/// assert!((estimate.price - 10.4506).abs() < 4.0 * estimate.std_error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarlo {
    paths: usize,
    seed: Option<u64>,
    finite_difference: FiniteDifference,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self::new(DEFAULT_PATHS)
    }
}

impl MonteCarlo {
    /// Identifier used in errors and timing records.
    pub const MODEL_ID: &'static str = "monte_carlo";

    /// Create an unseeded model simulating `paths` paths per estimate.
    ///
    /// # Panics
    ///
    /// Panics if `paths < 2`.
    pub fn new(paths: usize) -> Self {
        assert!(paths >= 2, "paths must be >= 2");
        Self {
            paths,
            seed: None,
            finite_difference: FiniteDifference::default(),
        }
    }

    /// Fix the seed so every `calculate` call is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of paths per estimate.
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Run one M-path simulation.
    ///
    /// Returns the intrinsic value with zero error when `T <= 0`.
    pub fn simulate(
        &self,
        config: OptionConfig,
        params: &MarketParams,
        rng: &mut PricerRng,
    ) -> SimulationEstimate {
        let option_type = config.option_type;
        if params.time_to_expiry <= 0.0 {
            return SimulationEstimate {
                price: option_type.intrinsic(params.spot, params.strike),
                std_error: 0.0,
            };
        }

        let t = params.time_to_expiry;
        let vol_sqrt_t = params.volatility * t.sqrt();
        let drift = (params.rate - 0.5 * params.volatility * params.volatility) * t;

        let mut payoff_sum = 0.0;
        let mut payoff_sum_sq = 0.0;
        for _ in 0..self.paths {
            let terminal = params.spot * (drift + vol_sqrt_t * rng.gen_normal()).exp();
            let payoff = option_type.intrinsic(terminal, params.strike);
            payoff_sum += payoff;
            payoff_sum_sq += payoff * payoff;
        }

        let n = self.paths as f64;
        let mean = payoff_sum / n;
        // Bessel-corrected sample variance
        let variance = ((payoff_sum_sq - n * mean * mean) / (n - 1.0)).max(0.0);
        let discount = params.discount_factor();

        SimulationEstimate {
            price: discount * mean,
            std_error: discount * (variance / n).sqrt(),
        }
    }
}

impl PricingModel for MonteCarlo {
    fn model_id(&self) -> &'static str {
        Self::MODEL_ID
    }

    fn calculate(
        &self,
        config: OptionConfig,
        inputs: &MarketInputSet,
    ) -> Result<ValuationResult, PricingError> {
        let params = inputs.params()?;
        if params.time_to_expiry <= 0.0 {
            return Err(PricingError::calculation(
                Self::MODEL_ID,
                "Greeks are undefined at expiry; time to expiry must be positive",
            ));
        }

        let mut rng = PricerRng::new(self.seed);
        let estimate = self.simulate(config, &params, &mut rng);
        let greeks = self.finite_difference.greeks(&params, estimate.price, |p| {
            Ok(self.simulate(config, p, &mut rng).price)
        })?;
        ValuationResult::new(estimate.price, greeks).ensure_finite(Self::MODEL_ID)
    }

    fn describe(&self) -> String {
        format!(
            "Monte Carlo Simulation: geometric Brownian motion terminal prices with {} paths, \
             European exercise, Greeks by finite differences on fresh simulations",
            self.paths
        )
    }
}
