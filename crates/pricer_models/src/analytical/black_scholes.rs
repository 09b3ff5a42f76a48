//! Black-Scholes pricing for European options.
//!
//! This module provides the closed-form kernel [`BlackScholes`] and the
//! [`EuropeanBlackScholes`] pricing model built on it.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Preconditions
//!
//! `T > 0` and `σ > 0`. The formulas divide by σ√T; callers reject zero
//! expiry and zero volatility before pricing. A model reached with them
//! reports a calculation error because the resulting Greeks are not finite.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::traits::PricingModel;
use pricer_core::types::{
    Greeks, MarketInputSet, MarketParams, OptionConfig, OptionType, PricingError, ValuationResult,
};

/// Closed-form Black-Scholes kernel for one set of market parameters.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputField, MarketInputSet};
/// use pricer_models::analytical::BlackScholes;
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
/// let bs = BlackScholes::new(&params);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = bs.price_call() - bs.price_put() - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    d1: f64,
    d2: f64,
    discount: f64,
}

impl BlackScholes {
    /// Evaluate d₁, d₂ and the discount factor for `params`.
    pub fn new(params: &MarketParams) -> Self {
        let vol_sqrt_t = params.volatility * params.time_to_expiry.sqrt();
        let d1 = ((params.spot / params.strike).ln()
            + (params.rate + 0.5 * params.volatility * params.volatility)
                * params.time_to_expiry)
            / vol_sqrt_t;

        Self {
            spot: params.spot,
            strike: params.strike,
            rate: params.rate,
            volatility: params.volatility,
            expiry: params.time_to_expiry,
            d1,
            d2: d1 - vol_sqrt_t,
            discount: params.discount_factor(),
        }
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    pub fn price_call(&self) -> f64 {
        self.spot * norm_cdf(self.d1) - self.strike * self.discount * norm_cdf(self.d2)
    }

    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    pub fn price_put(&self) -> f64 {
        self.strike * self.discount * norm_cdf(-self.d2) - self.spot * norm_cdf(-self.d1)
    }

    /// Price for the given option type.
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.price_call(),
            OptionType::Put => self.price_put(),
        }
    }

    /// Delta (∂V/∂S).
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) - 1
    pub fn delta(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => norm_cdf(self.d1),
            OptionType::Put => norm_cdf(self.d1) - 1.0,
        }
    }

    /// Gamma (∂²V/∂S²) = n(d₁) / (S·σ·√T), identical for calls and puts.
    pub fn gamma(&self) -> f64 {
        norm_pdf(self.d1) / (self.spot * self.volatility * self.expiry.sqrt())
    }

    /// Vega per 1 percentage point of volatility: S·n(d₁)·√T·0.01.
    pub fn vega(&self) -> f64 {
        self.spot * norm_pdf(self.d1) * self.expiry.sqrt() * 0.01
    }

    /// Theta per day.
    ///
    /// - Call Theta = [-S·n(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂)] / day count
    /// - Put Theta = [-S·n(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂)] / day count
    pub fn theta(&self, option_type: OptionType, day_count: f64) -> f64 {
        let decay = -self.spot * norm_pdf(self.d1) * self.volatility / (2.0 * self.expiry.sqrt());
        let carry = self.rate * self.strike * self.discount;
        let annual = match option_type {
            OptionType::Call => decay - carry * norm_cdf(self.d2),
            OptionType::Put => decay + carry * norm_cdf(-self.d2),
        };
        annual / day_count
    }

    /// Rho per 1 percentage point of interest rate.
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)·0.01
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)·0.01
    pub fn rho(&self, option_type: OptionType) -> f64 {
        let scale = self.strike * self.expiry * self.discount * 0.01;
        match option_type {
            OptionType::Call => scale * norm_cdf(self.d2),
            OptionType::Put => -scale * norm_cdf(-self.d2),
        }
    }

    /// All five Greeks.
    pub fn greeks(&self, option_type: OptionType, day_count: f64) -> Greeks {
        Greeks {
            delta: self.delta(option_type),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(option_type, day_count),
            rho: self.rho(option_type),
        }
    }

    /// Price and Greeks as a valuation result.
    pub fn valuation(&self, option_type: OptionType, day_count: f64) -> ValuationResult {
        ValuationResult::new(self.price(option_type), self.greeks(option_type, day_count))
    }
}

/// European Black-Scholes pricing model.
///
/// Closed-form prices and Greeks. The exercise style of the option
/// configuration is not consulted: every option is priced as European.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuropeanBlackScholes;

impl EuropeanBlackScholes {
    /// Identifier used in errors and timing records.
    pub const MODEL_ID: &'static str = "european";

    /// Create the model.
    pub fn new() -> Self {
        Self
    }
}

impl PricingModel for EuropeanBlackScholes {
    fn model_id(&self) -> &'static str {
        Self::MODEL_ID
    }

    fn calculate(
        &self,
        config: OptionConfig,
        inputs: &MarketInputSet,
    ) -> Result<ValuationResult, PricingError> {
        let params = inputs.params()?;
        BlackScholes::new(&params)
            .valuation(config.option_type, params.day_count)
            .ensure_finite(Self::MODEL_ID)
    }

    fn describe(&self) -> String {
        "European Black-Scholes: closed-form price and Greeks for European exercise".to_string()
    }
}
