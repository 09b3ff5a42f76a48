//! Request payloads and their validation.
//!
//! Requests carry volatility and interest rate in percent and expiry in days.
//! [`PricingRequest::validate`] converts them to the decimals and years the
//! models expect.

use serde::{Deserialize, Serialize};

use pricer_core::types::{
    InputField, MarketInputSet, OptionConfig, PricingError, DEFAULT_DAY_COUNT_CONVENTION,
};
use pricer_risk::range::RangeSpec;

/// Percent to decimal.
const PERCENT: f64 = 0.01;

/// Single option valuation request.
///
/// ```json
/// {
///   "strike": 100.0, "volatility": 20.0, "underlyingPrice": 100.0,
///   "daysToExpiry": 250.0, "interestRate": 5.0, "isCall": true,
///   "isEuropean": true, "dayCountConvention": 250.0, "modelType": "binomial"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub strike: Option<f64>,
    /// Volatility in percent
    pub volatility: Option<f64>,
    pub underlying_price: Option<f64>,
    pub days_to_expiry: Option<f64>,
    /// Interest rate in percent
    pub interest_rate: Option<f64>,
    pub is_call: Option<bool>,
    pub is_european: Option<bool>,
    /// Days per year; 250 when absent
    pub day_count_convention: Option<f64>,
    /// Model identifier; the European model when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

/// A request that passed validation, in model units.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub config: OptionConfig,
    pub inputs: MarketInputSet,
}

impl Valuation {
    /// Time to expiry in years.
    pub fn time_to_expiry(&self) -> f64 {
        self.inputs.get(InputField::TimeToExpiry).unwrap_or_default()
    }
}

fn required<T: Copy>(value: Option<T>, name: &str) -> Result<T, PricingError> {
    value.ok_or_else(|| PricingError::InvalidInput(format!("{} is required", name)))
}

fn finite(value: f64, name: &str) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::InvalidInput(format!(
            "{} must be a finite number",
            name
        )))
    }
}

fn positive(value: f64, name: &str) -> Result<f64, PricingError> {
    if finite(value, name)? > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::InvalidInput(format!(
            "{} must be greater than 0",
            name
        )))
    }
}

impl PricingRequest {
    /// Check every field and convert to model units.
    ///
    /// Days to expiry may be zero here; [`Valuation::time_to_expiry`] lets
    /// callers that need a live option reject it.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<Valuation, PricingError> {
        let strike = positive(required(self.strike, "Strike price")?, "Strike price")?;
        let volatility = positive(required(self.volatility, "Volatility")?, "Volatility")?;
        let spot = positive(
            required(self.underlying_price, "Underlying price")?,
            "Underlying price",
        )?;
        let days = finite(required(self.days_to_expiry, "Days to expiry")?, "Days to expiry")?;
        if days < 0.0 {
            return Err(PricingError::InvalidInput(
                "Days to expiry must be non-negative".to_string(),
            ));
        }
        let rate = finite(required(self.interest_rate, "Interest rate")?, "Interest rate")?;
        let is_call = required(self.is_call, "Is call option flag")?;
        let is_european = required(self.is_european, "Is European option flag")?;
        let day_count = positive(
            self.day_count_convention
                .unwrap_or(DEFAULT_DAY_COUNT_CONVENTION),
            "Day count convention",
        )?;

        let inputs = MarketInputSet::new()
            .with(InputField::Strike, strike)
            .with(InputField::Volatility, volatility * PERCENT)
            .with(InputField::UnderlyingPrice, spot)
            .with(InputField::TimeToExpiry, days / day_count)
            .with(InputField::InterestRate, rate * PERCENT)
            .with(InputField::DayCountConvention, day_count);

        Ok(Valuation {
            config: OptionConfig::new(is_call, is_european),
            inputs,
        })
    }

    /// Requested model identifier, if any.
    pub fn model_type(&self) -> Option<&str> {
        self.model_type.as_deref()
    }
}

/// Sweep parameters shared by both range endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub range_key: Option<String>,
    pub start_value: Option<f64>,
    pub end_value: Option<f64>,
    pub increment: Option<f64>,
}

/// Range calculation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRequest {
    pub base_request: Option<PricingRequest>,
    #[serde(flatten)]
    pub range: RangeParams,
}

impl RangeParams {
    /// Build the sweep for a validated base request.
    ///
    /// Keys name an input field. Volatility and interest rate are swept in
    /// percent and `daysToExpiry` sweeps time to expiry in days, so grid
    /// values stay in request units.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for a missing or unknown key, malformed
    /// bounds, or a start value outside the swept field's domain.
    pub fn to_spec(&self, base: &Valuation) -> Result<RangeSpec, PricingError> {
        let key = self
            .range_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                PricingError::InvalidInput("Range key cannot be null or empty".to_string())
            })?;
        let start = finite(required(self.start_value, "Start value")?, "Start value")?;
        let end = finite(required(self.end_value, "End value")?, "End value")?;
        let increment = finite(required(self.increment, "Increment")?, "Increment")?;
        if increment <= 0.0 {
            return Err(PricingError::InvalidInput(
                "Increment must be greater than 0".to_string(),
            ));
        }
        if start >= end {
            return Err(PricingError::InvalidInput(
                "Start value must be less than end value".to_string(),
            ));
        }

        let (field, unit_scale) = if is_days_key(key) {
            (InputField::TimeToExpiry, 1.0 / base.inputs.day_count_convention())
        } else {
            let field: InputField = key.parse()?;
            let scale = match field {
                InputField::Volatility | InputField::InterestRate => PERCENT,
                _ => 1.0,
            };
            (field, scale)
        };

        if field != InputField::InterestRate && start <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "Start value for {} must be greater than 0",
                key
            )));
        }

        Ok(RangeSpec::new(field, start, end, increment).with_unit_scale(unit_scale))
    }
}

fn is_days_key(key: &str) -> bool {
    let normalised: String = key.chars().filter(|c| *c != '_').collect();
    normalised.eq_ignore_ascii_case("daysToExpiry")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn atm_request() -> PricingRequest {
        PricingRequest {
            strike: Some(100.0),
            volatility: Some(20.0),
            underlying_price: Some(100.0),
            days_to_expiry: Some(250.0),
            interest_rate: Some(5.0),
            is_call: Some(true),
            is_european: Some(true),
            day_count_convention: Some(250.0),
            model_type: None,
        }
    }

    fn range(key: &str, start: f64, end: f64, increment: f64) -> RangeParams {
        RangeParams {
            range_key: Some(key.to_string()),
            start_value: Some(start),
            end_value: Some(end),
            increment: Some(increment),
        }
    }

    #[test]
    fn test_validate_converts_units() {
        let valuation = atm_request().validate().unwrap();
        let inputs = valuation.inputs;
        assert_eq!(inputs.get(InputField::Volatility), Some(0.2));
        assert_eq!(inputs.get(InputField::InterestRate), Some(0.05));
        assert_eq!(inputs.get(InputField::TimeToExpiry), Some(1.0));
        assert_eq!(inputs.get(InputField::DayCountConvention), Some(250.0));
        assert_eq!(valuation.config, OptionConfig::european_call());
    }

    #[test]
    fn test_day_count_defaults() {
        let request = PricingRequest {
            day_count_convention: None,
            days_to_expiry: Some(125.0),
            ..atm_request()
        };
        let valuation = request.validate().unwrap();
        assert_relative_eq!(valuation.time_to_expiry(), 0.5);
    }

    #[test]
    fn test_validation_messages() {
        let cases = [
            (
                PricingRequest {
                    strike: Some(0.0),
                    ..atm_request()
                },
                "Strike price must be greater than 0",
            ),
            (
                PricingRequest {
                    volatility: Some(-1.0),
                    ..atm_request()
                },
                "Volatility must be greater than 0",
            ),
            (
                PricingRequest {
                    underlying_price: Some(0.0),
                    ..atm_request()
                },
                "Underlying price must be greater than 0",
            ),
            (
                PricingRequest {
                    days_to_expiry: Some(-1.0),
                    ..atm_request()
                },
                "Days to expiry must be non-negative",
            ),
            (
                PricingRequest {
                    day_count_convention: Some(0.0),
                    ..atm_request()
                },
                "Day count convention must be greater than 0",
            ),
            (
                PricingRequest {
                    strike: None,
                    ..atm_request()
                },
                "Strike price is required",
            ),
            (
                PricingRequest {
                    is_european: None,
                    ..atm_request()
                },
                "Is European option flag is required",
            ),
            (
                PricingRequest {
                    interest_rate: Some(f64::NAN),
                    ..atm_request()
                },
                "Interest rate must be a finite number",
            ),
        ];

        for (request, message) in cases {
            match request.validate() {
                Err(PricingError::InvalidInput(m)) => assert_eq!(m, message),
                other => panic!("expected '{}', got {:?}", message, other),
            }
        }
    }

    #[test]
    fn test_zero_days_is_valid_request() {
        let request = PricingRequest {
            days_to_expiry: Some(0.0),
            ..atm_request()
        };
        assert_eq!(request.validate().unwrap().time_to_expiry(), 0.0);
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "strike": 95.0, "volatility": 25.0, "underlyingPrice": 100.0,
            "daysToExpiry": 30.0, "interestRate": 1.5, "isCall": false,
            "isEuropean": false, "dayCountConvention": 365.0, "modelType": "binomial"
        }"#;
        let request: PricingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.underlying_price, Some(100.0));
        assert_eq!(request.model_type(), Some("binomial"));
        assert_eq!(request.validate().unwrap().config, OptionConfig::american_put());
    }

    #[test]
    fn test_range_request_json() {
        let json = r#"{
            "baseRequest": {"strike": 100.0, "volatility": 20.0, "underlyingPrice": 100.0,
                            "daysToExpiry": 250.0, "interestRate": 5.0,
                            "isCall": true, "isEuropean": true},
            "rangeKey": "underlyingPrice", "startValue": 90.0, "endValue": 110.0,
            "increment": 5.0
        }"#;
        let request: RangeRequest = serde_json::from_str(json).unwrap();
        assert!(request.base_request.is_some());
        assert_eq!(request.range.range_key.as_deref(), Some("underlyingPrice"));
        assert_eq!(request.range.increment, Some(5.0));
    }

    #[test]
    fn test_range_spec_unit_scales() {
        let base = atm_request().validate().unwrap();

        let spec = range("volatility", 10.0, 30.0, 5.0).to_spec(&base).unwrap();
        assert_eq!(spec.field, InputField::Volatility);
        assert_eq!(spec.unit_scale, 0.01);

        let spec = range("interest_rate", -1.0, 5.0, 1.0).to_spec(&base).unwrap();
        assert_eq!(spec.field, InputField::InterestRate);
        assert_eq!(spec.unit_scale, 0.01);

        let spec = range("underlyingPrice", 90.0, 110.0, 5.0).to_spec(&base).unwrap();
        assert_eq!(spec.unit_scale, 1.0);

        let spec = range("daysToExpiry", 25.0, 250.0, 25.0).to_spec(&base).unwrap();
        assert_eq!(spec.field, InputField::TimeToExpiry);
        assert_relative_eq!(spec.unit_scale, 1.0 / 250.0);
    }

    #[test]
    fn test_range_validation_messages() {
        let base = atm_request().validate().unwrap();
        let cases = [
            (range(" ", 1.0, 2.0, 1.0), "Range key cannot be null or empty"),
            (range("strike", 1.0, 2.0, 0.0), "Increment must be greater than 0"),
            (range("strike", 2.0, 2.0, 1.0), "Start value must be less than end value"),
            (
                range("volatility", 0.0, 20.0, 5.0),
                "Start value for volatility must be greater than 0",
            ),
            (range("gamma", 1.0, 2.0, 1.0), "unknown input field 'gamma'"),
        ];
        for (params, message) in cases {
            match params.to_spec(&base) {
                Err(PricingError::InvalidInput(m)) => assert_eq!(m, message),
                other => panic!("expected '{}', got {:?}", message, other),
            }
        }

        let missing = RangeParams {
            range_key: None,
            ..range("strike", 1.0, 2.0, 1.0)
        };
        assert!(missing.to_spec(&base).is_err());
    }

    proptest! {
        #[test]
        fn prop_valid_requests_convert_consistently(
            strike in 1.0..500.0_f64,
            volatility in 1.0..150.0_f64,
            spot in 1.0..500.0_f64,
            days in 0.0..1000.0_f64,
            rate in -5.0..20.0_f64,
            day_count in prop::sample::select(vec![250.0, 252.0, 360.0, 365.0]),
        ) {
            let request = PricingRequest {
                strike: Some(strike),
                volatility: Some(volatility),
                underlying_price: Some(spot),
                days_to_expiry: Some(days),
                interest_rate: Some(rate),
                day_count_convention: Some(day_count),
                ..atm_request()
            };
            let inputs = request.validate().unwrap().inputs;
            prop_assert_eq!(inputs.get(InputField::Strike), Some(strike));
            prop_assert_eq!(inputs.get(InputField::Volatility), Some(volatility * 0.01));
            prop_assert_eq!(inputs.get(InputField::InterestRate), Some(rate * 0.01));
            prop_assert_eq!(inputs.get(InputField::TimeToExpiry), Some(days / day_count));
        }

        #[test]
        fn prop_non_positive_strike_is_rejected(strike in -1000.0..=0.0_f64) {
            let request = PricingRequest {
                strike: Some(strike),
                ..atm_request()
            };
            prop_assert!(request.validate().is_err());
        }
    }
}
