//! Central finite-difference Greeks.
//!
//! For a pricing function V(S, σ, r, T):
//!
//! - Delta = (V(S+h) - V(S-h)) / 2h
//! - Gamma = (V(S+h) - 2V(S) + V(S-h)) / h²
//! - Vega  = (V(σ+h) - V(σ-h)) / 2h × 0.01
//! - Rho   = (V(r+h) - V(r-h)) / 2h × 0.01
//! - Theta = -(V(T+h) - V(T-h)) / 2h / day count
//!
//! Each bump is a fraction of the bumped value, so every Greek costs two
//! repricings and gamma shares its two with delta. A field whose value is
//! exactly zero (typically the interest rate) is bumped by an absolute
//! [`ZERO_VALUE_BUMP`] instead.

use pricer_core::types::{Greeks, InputField, MarketParams, PricingError};

/// Default bump as a fraction of the bumped value (1%).
pub const DEFAULT_RELATIVE_BUMP: f64 = 0.01;

/// Absolute bump applied to fields whose value is zero.
pub const ZERO_VALUE_BUMP: f64 = 1e-4;

/// Central finite-difference Greeks calculator.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputField, MarketInputSet, MarketParams, PricingError};
/// use pricer_models::greeks::FiniteDifference;
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
/// // Forward contract: V = S - K e^(-rT), delta = 1, gamma = 0
/// let forward = |p: &MarketParams| -> Result<f64, PricingError> {
///     Ok(p.spot - p.strike * p.discount_factor())
/// };
/// let base = forward(&params).unwrap();
/// let greeks = FiniteDifference::default().greeks(&params, base, forward).unwrap();
/// assert!((greeks.delta - 1.0).abs() < 1e-9);
/// assert!(greeks.gamma.abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    relative_bump: f64,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self {
            relative_bump: DEFAULT_RELATIVE_BUMP,
        }
    }
}

impl FiniteDifference {
    /// Create a calculator with a custom relative bump.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < relative_bump < 1`.
    pub fn new(relative_bump: f64) -> Self {
        assert!(
            relative_bump > 0.0 && relative_bump < 1.0,
            "relative_bump must be in (0, 1)"
        );
        Self { relative_bump }
    }

    /// Bump size for a field currently at `value`.
    #[inline]
    pub fn bump_size(&self, value: f64) -> f64 {
        let h = value.abs() * self.relative_bump;
        if h > 0.0 {
            h
        } else {
            ZERO_VALUE_BUMP
        }
    }

    /// Compute all five Greeks of `price`.
    ///
    /// `base_price` is `price(params)`, which the caller already has.
    ///
    /// # Errors
    /// Propagates the first error returned by `price`.
    pub fn greeks<F>(
        &self,
        params: &MarketParams,
        base_price: f64,
        mut price: F,
    ) -> Result<Greeks, PricingError>
    where
        F: FnMut(&MarketParams) -> Result<f64, PricingError>,
    {
        let (spot_up, spot_down, h_spot) =
            self.reprice(params, InputField::UnderlyingPrice, &mut price)?;
        let (vol_up, vol_down, h_vol) = self.reprice(params, InputField::Volatility, &mut price)?;
        let (rate_up, rate_down, h_rate) =
            self.reprice(params, InputField::InterestRate, &mut price)?;
        let (time_up, time_down, h_time) =
            self.reprice(params, InputField::TimeToExpiry, &mut price)?;

        Ok(Greeks {
            delta: (spot_up - spot_down) / (2.0 * h_spot),
            gamma: (spot_up - 2.0 * base_price + spot_down) / (h_spot * h_spot),
            vega: (vol_up - vol_down) / (2.0 * h_vol) * 0.01,
            theta: -(time_up - time_down) / (2.0 * h_time) / params.day_count,
            rho: (rate_up - rate_down) / (2.0 * h_rate) * 0.01,
        })
    }

    fn reprice<F>(
        &self,
        params: &MarketParams,
        field: InputField,
        price: &mut F,
    ) -> Result<(f64, f64, f64), PricingError>
    where
        F: FnMut(&MarketParams) -> Result<f64, PricingError>,
    {
        let value = params.get(field);
        let h = self.bump_size(value);
        let up = price(&params.with_value(field, value + h))?;
        let down = price(&params.with_value(field, value - h))?;
        Ok((up, down, h))
    }
}
