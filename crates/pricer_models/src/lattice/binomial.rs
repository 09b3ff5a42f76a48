//! Cox-Ross-Rubinstein binomial tree.
//!
//! With N steps over expiry T:
//!
//! - dt = T/N, u = e^(σ√dt), d = 1/u
//! - p = (e^(r·dt) - d) / (u - d)
//! - node value = e^(-r·dt)·(p·V_up + (1-p)·V_down)
//!
//! American nodes take `max(intrinsic, continuation)`. Greeks reprice the full
//! lattice for every bump.

use pricer_core::traits::PricingModel;
use pricer_core::types::{
    ExerciseStyle, MarketInputSet, MarketParams, OptionConfig, PricingError, ValuationResult,
};

use crate::greeks::FiniteDifference;

/// Default number of time steps.
pub const DEFAULT_STEPS: usize = 1000;

/// Binomial tree pricing model.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputField, MarketInputSet, OptionConfig};
/// use pricer_models::lattice::BinomialTree;
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
/// let tree = BinomialTree::new(500);
/// let european = tree.price(OptionConfig::european_put(), &params).unwrap();
/// let american = tree.price(OptionConfig::american_put(), &params).unwrap();
/// assert!(american > european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialTree {
    steps: usize,
    finite_difference: FiniteDifference,
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS)
    }
}

impl BinomialTree {
    /// Identifier used in errors and timing records.
    pub const MODEL_ID: &'static str = "binomial";

    /// Create a tree with `steps` time steps.
    ///
    /// # Panics
    ///
    /// Panics if `steps == 0` or `steps` exceeds `i32::MAX`.
    pub fn new(steps: usize) -> Self {
        assert!(steps > 0, "steps must be > 0");
        assert!(i32::try_from(steps).is_ok(), "steps must fit in i32");
        Self {
            steps,
            finite_difference: FiniteDifference::default(),
        }
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Lattice price.
    ///
    /// Returns the intrinsic value when `T <= 0`.
    ///
    /// # Errors
    /// `PricingError::Calculation` if the risk-neutral probability falls
    /// outside [0, 1], which happens when σ√dt is small relative to r·dt.
    pub fn price(&self, config: OptionConfig, params: &MarketParams) -> Result<f64, PricingError> {
        let payoff = |spot: f64| config.option_type.intrinsic(spot, params.strike);

        if params.time_to_expiry <= 0.0 {
            return Ok(payoff(params.spot));
        }

        let n = self.steps;
        let dt = params.time_to_expiry / n as f64;
        let u = (params.volatility * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p = ((params.rate * dt).exp() - d) / (u - d);
        let discount = (-params.rate * dt).exp();

        if !(0.0..=1.0).contains(&p) {
            return Err(PricingError::calculation(
                Self::MODEL_ID,
                format!(
                    "risk-neutral probability {} outside [0, 1] with {} steps",
                    p, n
                ),
            ));
        }

        // Node i at step k sits at S·u^(k-i)·d^i = S·u^(k-2i)
        let node_spot = |step: usize, i: usize| params.spot * u.powi(step as i32 - 2 * i as i32);

        let mut values: Vec<f64> = (0..=n).map(|i| payoff(node_spot(n, i))).collect();

        for step in (0..n).rev() {
            for i in 0..=step {
                let continuation = discount * (p * values[i] + (1.0 - p) * values[i + 1]);
                values[i] = match config.exercise {
                    ExerciseStyle::European => continuation,
                    ExerciseStyle::American => continuation.max(payoff(node_spot(step, i))),
                };
            }
        }

        Ok(values[0])
    }
}

impl PricingModel for BinomialTree {
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

        let price = self.price(config, &params)?;
        let greeks = self
            .finite_difference
            .greeks(&params, price, |p| self.price(config, p))?;
        ValuationResult::new(price, greeks).ensure_finite(Self::MODEL_ID)
    }

    fn describe(&self) -> String {
        format!(
            "Binomial Tree: Cox-Ross-Rubinstein lattice with {} steps, European or American \
             exercise, Greeks by finite differences",
            self.steps
        )
    }
}
