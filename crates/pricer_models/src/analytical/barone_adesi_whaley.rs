//! American Black-Scholes pricing via the Barone-Adesi-Whaley approximation.
//!
//! On a non-dividend underlying an American call is never exercised early, so
//! calls are priced (with Greeks) exactly as European calls.
//!
//! American puts use the quadratic approximation of Barone-Adesi and Whaley
//! (1987) with cost of carry b = r:
//!
//! - M = 2r/σ², h = 1 - e^(-rT)
//! - q = (-(M-1) - √((M-1)² + 4M/h)) / 2   (negative root)
//! - S* solves K - S* = P(S*) - (1 - N(-d₁(S*)))·S*/q
//! - A = -(S*/q)·(1 - N(-d₁(S*)))
//!
//! The put is worth `P(S) + A·(S/S*)^q` above the critical price S* and
//! `K - S` at or below it, where P is the European put. A is positive, so the
//! American put never falls below the European put.
//!
//! The early-exercise boundary has no closed-form sensitivities: put Greeks
//! are central finite differences of the approximation itself, which costs
//! eight extra put valuations per call.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use pricer_core::traits::PricingModel;
use pricer_core::types::{
    InputField, MarketInputSet, MarketParams, OptionConfig, OptionType, PricingError,
    ValuationResult,
};

use super::black_scholes::BlackScholes;
use crate::greeks::FiniteDifference;

/// Iteration cap for the critical price search.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Critical price tolerance, relative to the strike.
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// American option model using the Barone-Adesi-Whaley approximation.
///
/// The exercise style of the option configuration is not consulted: this
/// model always allows early exercise.
///
/// # Examples
/// ```
/// use pricer_core::traits::PricingModel;
/// use pricer_core::types::{InputField, MarketInputSet, OptionConfig};
/// use pricer_models::analytical::{AmericanBlackScholes, EuropeanBlackScholes};
///
/// let inputs = MarketInputSet::new()
///     .with(InputField::Strike, 100.0)
///     .with(InputField::UnderlyingPrice, 100.0)
///     .with(InputField::Volatility, 0.2)
///     .with(InputField::TimeToExpiry, 1.0)
///     .with(InputField::InterestRate, 0.05);
///
/// let american = AmericanBlackScholes::default()
///     .calculate(OptionConfig::american_put(), &inputs)
///     .unwrap();
/// let european = EuropeanBlackScholes
///     .calculate(OptionConfig::european_put(), &inputs)
///     .unwrap();
/// assert!(american.price > european.price);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmericanBlackScholes {
    max_iterations: usize,
    finite_difference: FiniteDifference,
}

impl Default for AmericanBlackScholes {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

impl AmericanBlackScholes {
    /// Identifier used in errors and timing records.
    pub const MODEL_ID: &'static str = "american";

    /// Create the model with an iteration cap for the critical price search.
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations == 0`.
    pub fn new(max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            max_iterations,
            finite_difference: FiniteDifference::default(),
        }
    }

    /// Iteration cap for the critical price search.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// American put price.
    ///
    /// - `T <= 0`: intrinsic value `max(K - S, 0)`
    /// - `r <= 0`: the European put (early exercise is never optimal)
    /// - otherwise the Barone-Adesi-Whaley approximation
    ///
    /// # Errors
    /// `PricingError::Calculation` if the critical price search fails.
    pub fn put_price(&self, params: &MarketParams) -> Result<f64, PricingError> {
        if params.time_to_expiry <= 0.0 {
            return Ok(OptionType::Put.intrinsic(params.spot, params.strike));
        }

        let european = BlackScholes::new(params).price_put();
        if params.rate <= 0.0 {
            return Ok(european);
        }

        let q = Self::exponent(params);
        let critical = self.critical_price(params, q)?;

        if params.spot > critical {
            let a = Self::premium_coefficient(params, critical, q);
            Ok(european + a * (params.spot / critical).powf(q))
        } else {
            Ok(params.strike - params.spot)
        }
    }

    /// Critical underlying price S* below which the put is exercised.
    ///
    /// Only meaningful for `T > 0` and `r > 0`.
    ///
    /// # Errors
    /// `PricingError::Calculation` if Newton-Raphson does not converge.
    pub fn critical_put_price(&self, params: &MarketParams) -> Result<f64, PricingError> {
        self.critical_price(params, Self::exponent(params))
    }

    /// Negative root q of the characteristic quadratic.
    fn exponent(params: &MarketParams) -> f64 {
        let variance = params.volatility * params.volatility;
        let m = 2.0 * params.rate / variance;
        let h = -(-params.rate * params.time_to_expiry).exp_m1();
        let n_minus_one = m - 1.0;
        0.5 * (-n_minus_one - (n_minus_one * n_minus_one + 4.0 * m / h).sqrt())
    }

    /// A = -(S*/q)·(1 - N(-d₁(S*)))
    fn premium_coefficient(params: &MarketParams, critical: f64, q: f64) -> f64 {
        let d1 = BlackScholes::new(&params.with_value(InputField::UnderlyingPrice, critical)).d1();
        -(critical / q) * (1.0 - norm_cdf(-d1))
    }

    fn critical_price(&self, params: &MarketParams, q: f64) -> Result<f64, PricingError> {
        let strike = params.strike;
        let vol_sqrt_t = params.volatility * params.time_to_expiry.sqrt();

        let f = |s: f64| {
            let bs = BlackScholes::new(&params.with_value(InputField::UnderlyingPrice, s));
            strike - s - bs.price_put() + (1.0 - norm_cdf(-bs.d1())) * s / q
        };
        let f_prime = |s: f64| {
            let bs = BlackScholes::new(&params.with_value(InputField::UnderlyingPrice, s));
            -(1.0 - norm_cdf(-bs.d1())) * (1.0 - 1.0 / q) + norm_pdf(bs.d1()) / (q * vol_sqrt_t)
        };

        let solver = NewtonRaphsonSolver::new(SolverConfig::new(
            RELATIVE_TOLERANCE * strike.abs().max(1.0),
            self.max_iterations,
        ));
        solver
            .find_positive_root(f, f_prime, Self::seed(params))
            .map_err(|e| {
                PricingError::calculation(
                    Self::MODEL_ID,
                    format!("critical price search failed: {}", e),
                )
            })
    }

    /// Starting point for the critical price search.
    ///
    /// The Barone-Adesi-Whaley seed interpolates between the perpetual
    /// critical price and the strike. S* always lies strictly between the
    /// two, so a seed outside that interval (high rate, low volatility) is
    /// replaced by its midpoint.
    fn seed(params: &MarketParams) -> f64 {
        let variance = params.volatility * params.volatility;
        let m = 2.0 * params.rate / variance;
        let n_minus_one = m - 1.0;
        let q_infinite = 0.5 * (-n_minus_one - (n_minus_one * n_minus_one + 4.0 * m).sqrt());
        let s_infinite = params.strike / (1.0 - 1.0 / q_infinite);
        let h = (params.rate * params.time_to_expiry
            - 2.0 * params.volatility * params.time_to_expiry.sqrt())
            * params.strike
            / (params.strike - s_infinite);
        let seed = s_infinite + (params.strike - s_infinite) * h.exp();
        if seed > s_infinite && seed < params.strike {
            seed
        } else {
            0.5 * (s_infinite + params.strike)
        }
    }
}

impl PricingModel for AmericanBlackScholes {
    fn model_id(&self) -> &'static str {
        Self::MODEL_ID
    }

    fn calculate(
        &self,
        config: OptionConfig,
        inputs: &MarketInputSet,
    ) -> Result<ValuationResult, PricingError> {
        let params = inputs.params()?;

        match config.option_type {
            OptionType::Call => BlackScholes::new(&params)
                .valuation(OptionType::Call, params.day_count)
                .ensure_finite(Self::MODEL_ID),
            OptionType::Put => {
                if params.time_to_expiry <= 0.0 {
                    return Err(PricingError::calculation(
                        Self::MODEL_ID,
                        "Greeks are undefined at expiry; time to expiry must be positive",
                    ));
                }
                let price = self.put_price(&params)?;
                let greeks = self
                    .finite_difference
                    .greeks(&params, price, |p| self.put_price(p))?;
                ValuationResult::new(price, greeks).ensure_finite(Self::MODEL_ID)
            }
        }
    }

    fn describe(&self) -> String {
        format!(
            "American Black-Scholes: Barone-Adesi-Whaley approximation, calls priced as European, \
             put Greeks by finite differences (critical price search capped at {} iterations)",
            self.max_iterations
        )
    }
}
