//! Option configuration passed to every valuation.
//!
//! Call/put and exercise style travel with each valuation call as a small
//! `Copy` value instead of living on the model instance, so one model can be
//! shared by any number of concurrent valuations.

use std::fmt;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    /// Immediate exercise value: max(S − K, 0) or max(K − S, 0).
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionType;
    ///
    /// assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
    /// assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

/// When the option may be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ExerciseStyle {
    /// Exercise only at expiry
    European,
    /// Exercise at any time up to expiry
    American,
}

/// Immutable per-valuation option configuration.
///
/// # Examples
/// ```
/// use pricer_core::types::{ExerciseStyle, OptionConfig, OptionType};
///
/// let config = OptionConfig::new(false, false);
/// assert_eq!(config.option_type, OptionType::Put);
/// assert_eq!(config.exercise, ExerciseStyle::American);
/// assert_eq!(config.to_string(), "American put");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OptionConfig {
    /// Call or put
    pub option_type: OptionType,
    /// Exercise style
    pub exercise: ExerciseStyle,
}

impl OptionConfig {
    /// Build from the two request flags.
    pub fn new(is_call: bool, is_european: bool) -> Self {
        Self {
            option_type: if is_call {
                OptionType::Call
            } else {
                OptionType::Put
            },
            exercise: if is_european {
                ExerciseStyle::European
            } else {
                ExerciseStyle::American
            },
        }
    }

    /// European call.
    pub fn european_call() -> Self {
        Self::new(true, true)
    }

    /// European put.
    pub fn european_put() -> Self {
        Self::new(false, true)
    }

    /// American call.
    pub fn american_call() -> Self {
        Self::new(true, false)
    }

    /// American put.
    pub fn american_put() -> Self {
        Self::new(false, false)
    }

    /// Returns `true` for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }

    /// Returns `true` for European exercise.
    #[inline]
    pub fn is_european(&self) -> bool {
        self.exercise == ExerciseStyle::European
    }
}

impl fmt::Display for OptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.exercise {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
        };
        let kind = match self.option_type {
            OptionType::Call => "call",
            OptionType::Put => "put",
        };
        write!(f, "{} {}", style, kind)
    }
}
