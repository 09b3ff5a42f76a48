//! The pricing model contract.

use crate::types::{MarketInputSet, OptionConfig, PricingError, ValuationResult};

/// Capability set shared by every pricing model.
///
/// Implementations hold only immutable settings (step counts, path counts),
/// so a single instance can serve concurrent valuations. The option
/// configuration is an explicit argument of each call.
///
/// # Example
///
/// ```
/// use pricer_core::traits::PricingModel;
/// use pricer_core::types::{
///     Greeks, InputField, MarketInputSet, OptionConfig, PricingError, ValuationResult,
/// };
///
/// struct Intrinsic;
///
/// impl PricingModel for Intrinsic {
///     fn model_id(&self) -> &'static str {
///         "intrinsic"
///     }
///
///     fn calculate(
///         &self,
///         config: OptionConfig,
///         inputs: &MarketInputSet,
///     ) -> Result<ValuationResult, PricingError> {
///         let params = inputs.params()?;
///         let price = config.option_type.intrinsic(params.spot, params.strike);
///         Ok(ValuationResult::new(price, Greeks::default()))
///     }
///
///     fn describe(&self) -> String {
///         "Intrinsic value".to_string()
///     }
/// }
///
/// let inputs = MarketInputSet::new()
///     .with(InputField::Strike, 100.0)
///     .with(InputField::UnderlyingPrice, 90.0)
///     .with(InputField::Volatility, 0.2)
///     .with(InputField::TimeToExpiry, 1.0)
///     .with(InputField::InterestRate, 0.05);
/// let result = Intrinsic.calculate(OptionConfig::european_put(), &inputs).unwrap();
/// assert_eq!(result.price, 10.0);
/// ```
pub trait PricingModel: Send + Sync {
    /// Stable identifier attached to calculation errors and timing records.
    fn model_id(&self) -> &'static str;

    /// Price and Greeks for one input set.
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` if a required field is absent
    /// - `PricingError::Calculation` on numerical failure
    fn calculate(
        &self,
        config: OptionConfig,
        inputs: &MarketInputSet,
    ) -> Result<ValuationResult, PricingError>;

    /// Human-readable description of the model and its settings.
    fn describe(&self) -> String;
}
