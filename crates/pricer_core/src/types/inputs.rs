//! Market input sets.
//!
//! A [`MarketInputSet`] maps a fixed set of named fields ([`InputField`]) to
//! `f64` values. It is `Copy`, so the range engine "clones" it for every grid
//! point simply by value and overwrites exactly one field.
//!
//! Models resolve an input set into [`MarketParams`] before pricing. That is
//! the only place field presence is checked.

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Day-count convention used when an input set does not specify one.
pub const DEFAULT_DAY_COUNT_CONVENTION: f64 = 250.0;

/// Named scalar fields of a market input set.
///
/// Field names parse case-insensitively and ignore underscores, so
/// `underlyingPrice`, `underlying_price` and `UNDERLYING_PRICE` all name
/// [`InputField::UnderlyingPrice`].
///
/// # Examples
/// ```
/// use pricer_core::types::InputField;
///
/// let field: InputField = "UNDERLYING_PRICE".parse().unwrap();
/// assert_eq!(field, InputField::UnderlyingPrice);
/// assert_eq!(field.name(), "underlyingPrice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum InputField {
    /// Strike price K
    Strike,
    /// Volatility σ as a decimal (0.2 = 20%)
    Volatility,
    /// Spot price of the underlying S
    UnderlyingPrice,
    /// Time to expiry T in years
    TimeToExpiry,
    /// Continuously-compounded interest rate r as a decimal
    InterestRate,
    /// Days per year used to scale theta
    DayCountConvention,
}

impl InputField {
    /// Number of fields.
    pub const COUNT: usize = 6;

    /// All fields in declaration order.
    pub const ALL: [InputField; Self::COUNT] = [
        InputField::Strike,
        InputField::Volatility,
        InputField::UnderlyingPrice,
        InputField::TimeToExpiry,
        InputField::InterestRate,
        InputField::DayCountConvention,
    ];

    /// Canonical camelCase name.
    pub const fn name(self) -> &'static str {
        match self {
            InputField::Strike => "strike",
            InputField::Volatility => "volatility",
            InputField::UnderlyingPrice => "underlyingPrice",
            InputField::TimeToExpiry => "timeToExpiry",
            InputField::InterestRate => "interestRate",
            InputField::DayCountConvention => "dayCountConvention",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputField {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        InputField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(&normalised))
            .ok_or_else(|| PricingError::InvalidInput(format!("unknown input field '{}'", s)))
    }
}

/// Mapping from [`InputField`] to values.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputField, MarketInputSet};
///
/// let base = MarketInputSet::new()
///     .with(InputField::Strike, 100.0)
///     .with(InputField::UnderlyingPrice, 100.0);
///
/// let mut bumped = base;
/// bumped.set(InputField::UnderlyingPrice, 105.0);
///
/// assert_eq!(base.get(InputField::UnderlyingPrice), Some(100.0));
/// assert_eq!(bumped.get(InputField::UnderlyingPrice), Some(105.0));
/// assert_eq!(bumped.get(InputField::Volatility), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketInputSet {
    values: [Option<f64>; InputField::COUNT],
}

impl MarketInputSet {
    /// Create an empty input set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: InputField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    /// Overwrite (or insert) a field.
    pub fn set(&mut self, field: InputField, value: f64) {
        self.values[field.index()] = Some(value);
    }

    /// Value of a field, if present.
    pub fn get(&self, field: InputField) -> Option<f64> {
        self.values[field.index()]
    }

    /// Value of a required field.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if the field is absent.
    pub fn require(&self, field: InputField) -> Result<f64, PricingError> {
        self.get(field)
            .ok_or_else(|| PricingError::missing_field(field))
    }

    /// Day-count convention, defaulting to [`DEFAULT_DAY_COUNT_CONVENTION`].
    pub fn day_count_convention(&self) -> f64 {
        self.get(InputField::DayCountConvention)
            .unwrap_or(DEFAULT_DAY_COUNT_CONVENTION)
    }

    /// Iterate over the fields that are present.
    pub fn iter(&self) -> impl Iterator<Item = (InputField, f64)> + '_ {
        InputField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    /// Resolve into model parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` naming the first absent required field.
    pub fn params(&self) -> Result<MarketParams, PricingError> {
        Ok(MarketParams {
            spot: self.require(InputField::UnderlyingPrice)?,
            strike: self.require(InputField::Strike)?,
            volatility: self.require(InputField::Volatility)?,
            time_to_expiry: self.require(InputField::TimeToExpiry)?,
            rate: self.require(InputField::InterestRate)?,
            day_count: self.day_count_convention(),
        })
    }
}

impl From<MarketParams> for MarketInputSet {
    fn from(params: MarketParams) -> Self {
        InputField::ALL
            .into_iter()
            .fold(MarketInputSet::new(), |set, field| {
                set.with(field, params.get(field))
            })
    }
}

/// Fully resolved model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParams {
    /// Spot price S
    pub spot: f64,
    /// Strike K
    pub strike: f64,
    /// Volatility σ (decimal)
    pub volatility: f64,
    /// Time to expiry T (years)
    pub time_to_expiry: f64,
    /// Interest rate r (decimal, continuous compounding)
    pub rate: f64,
    /// Days per year for theta
    pub day_count: f64,
}

impl MarketParams {
    /// Value of a field.
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Strike => self.strike,
            InputField::Volatility => self.volatility,
            InputField::UnderlyingPrice => self.spot,
            InputField::TimeToExpiry => self.time_to_expiry,
            InputField::InterestRate => self.rate,
            InputField::DayCountConvention => self.day_count,
        }
    }

    /// Copy with one field replaced.
    pub fn with_value(mut self, field: InputField, value: f64) -> Self {
        match field {
            InputField::Strike => self.strike = value,
            InputField::Volatility => self.volatility = value,
            InputField::UnderlyingPrice => self.spot = value,
            InputField::TimeToExpiry => self.time_to_expiry = value,
            InputField::InterestRate => self.rate = value,
            InputField::DayCountConvention => self.day_count = value,
        }
        self
    }

    /// Discount factor e^(−rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time_to_expiry).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MarketInputSet {
        MarketInputSet::new()
            .with(InputField::Strike, 100.0)
            .with(InputField::Volatility, 0.2)
            .with(InputField::UnderlyingPrice, 95.0)
            .with(InputField::TimeToExpiry, 0.5)
            .with(InputField::InterestRate, 0.03)
    }

    #[test]
    fn test_field_parsing_accepts_all_spellings() {
        for name in ["underlyingPrice", "underlying_price", "UNDERLYING_PRICE", " UnderlyingPrice "] {
            assert_eq!(
                name.parse::<InputField>().unwrap(),
                InputField::UnderlyingPrice
            );
        }
        assert_eq!(
            "TIME_TO_EXPIRY".parse::<InputField>().unwrap(),
            InputField::TimeToExpiry
        );
        assert_eq!(
            "dayCountConvention".parse::<InputField>().unwrap(),
            InputField::DayCountConvention
        );
    }

    #[test]
    fn test_field_parsing_rejects_unknown() {
        let err = "dividendYield".parse::<InputField>().unwrap_err();
        assert!(err.is_invalid_input());
        assert!("".parse::<InputField>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for field in InputField::ALL {
            assert_eq!(field.name().parse::<InputField>().unwrap(), field);
        }
    }

    #[test]
    fn test_params_default_day_count() {
        let params = sample().params().unwrap();
        assert_eq!(params.day_count, DEFAULT_DAY_COUNT_CONVENTION);
        assert_eq!(params.spot, 95.0);

        let params = sample()
            .with(InputField::DayCountConvention, 365.0)
            .params()
            .unwrap();
        assert_eq!(params.day_count, 365.0);
    }

    #[test]
    fn test_params_missing_field() {
        let mut values = sample();
        values.values[InputField::Volatility.index()] = None;
        let err = values.params().unwrap_err();
        assert_eq!(err, PricingError::missing_field(InputField::Volatility));
    }

    #[test]
    fn test_copy_is_independent() {
        let base = sample();
        let mut copy = base;
        copy.set(InputField::Strike, 120.0);
        assert_eq!(base.get(InputField::Strike), Some(100.0));
        assert_eq!(copy.get(InputField::Strike), Some(120.0));
    }

    #[test]
    fn test_iter_skips_absent_fields() {
        let fields: Vec<_> = sample().iter().map(|(f, _)| f).collect();
        assert_eq!(fields.len(), 5);
        assert!(!fields.contains(&InputField::DayCountConvention));
    }

    #[test]
    fn test_params_round_trip_through_input_set() {
        let params = sample().params().unwrap();
        let set = MarketInputSet::from(params);
        assert_eq!(set.params().unwrap(), params);
        assert_eq!(set.get(InputField::DayCountConvention), Some(250.0));
    }

    #[test]
    fn test_with_value_replaces_one_field() {
        let params = sample().params().unwrap();
        let bumped = params.with_value(InputField::InterestRate, 0.04);
        assert_eq!(bumped.rate, 0.04);
        assert_eq!(bumped.spot, params.spot);
        assert_eq!(params.with_value(InputField::Strike, 90.0).get(InputField::Strike), 90.0);
    }
}
